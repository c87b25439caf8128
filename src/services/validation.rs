//! Conflict checks over a run's entries.
//!
//! The solver is responsible for producing conflict-free placements; these
//! checks re-verify the hard invariants on the client side so a defective
//! or stale payload is surfaced during review instead of after commit:
//! within one run no two entries may occupy the same room at the same
//! (day, slot), and no teacher may be placed twice in the same (day, slot).
//! Parallel lab groups share day/slot/course but must differ in room and
//! teacher, so they pass these checks unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::{ScheduleEntry, ScheduleEntryId};
use crate::models::time_grid::{DAY_RANGE, SLOT_RANGE};

/// One detected conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictIssue {
    /// The entries involved
    pub entry_ids: Vec<ScheduleEntryId>,
    pub issue_type: ConflictType,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    RoomDoubleBooked,
    TeacherDoubleBooked,
    PositionOutOfRange,
}

/// Result of checking one run's entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub total_entries: usize,
    pub issues: Vec<ConflictIssue>,
}

impl ConflictReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check a run's entries against the placement invariants.
pub fn check_entry_conflicts(entries: &[ScheduleEntry]) -> ConflictReport {
    let mut issues = Vec::new();

    let mut by_room_slot: HashMap<(i64, u8, u8), Vec<&ScheduleEntry>> = HashMap::new();
    let mut by_teacher_slot: HashMap<(i64, u8, u8), Vec<&ScheduleEntry>> = HashMap::new();

    for entry in entries {
        if !DAY_RANGE.contains(&entry.day_of_week) || !SLOT_RANGE.contains(&entry.slot_number) {
            issues.push(ConflictIssue {
                entry_ids: vec![entry.id],
                issue_type: ConflictType::PositionOutOfRange,
                description: format!(
                    "entry {} is placed at day {} slot {}, outside the time grid",
                    entry.id, entry.day_of_week, entry.slot_number
                ),
            });
        }

        by_room_slot
            .entry((entry.room_id.value(), entry.day_of_week, entry.slot_number))
            .or_default()
            .push(entry);
        by_teacher_slot
            .entry((entry.teacher_id.value(), entry.day_of_week, entry.slot_number))
            .or_default()
            .push(entry);
    }

    let mut room_groups: Vec<_> = by_room_slot.into_iter().collect();
    room_groups.sort_by_key(|(key, _)| *key);
    for ((room_id, day, slot), group) in room_groups {
        if group.len() > 1 {
            issues.push(ConflictIssue {
                entry_ids: group.iter().map(|e| e.id).collect(),
                issue_type: ConflictType::RoomDoubleBooked,
                description: format!(
                    "room {} is booked {} times on day {} slot {}",
                    room_id,
                    group.len(),
                    day,
                    slot
                ),
            });
        }
    }

    let mut teacher_groups: Vec<_> = by_teacher_slot.into_iter().collect();
    teacher_groups.sort_by_key(|(key, _)| *key);
    for ((teacher_id, day, slot), group) in teacher_groups {
        if group.len() > 1 {
            issues.push(ConflictIssue {
                entry_ids: group.iter().map(|e| e.id).collect(),
                issue_type: ConflictType::TeacherDoubleBooked,
                description: format!(
                    "teacher {} is placed {} times on day {} slot {}",
                    teacher_id,
                    group.len(),
                    day,
                    slot
                ),
            });
        }
    }

    ConflictReport {
        total_entries: entries.len(),
        issues,
    }
}
