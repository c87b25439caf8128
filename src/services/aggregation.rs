//! Aggregation engine: deterministic projections of a run's entries.
//!
//! Each function groups a flat entry list by one dimension and orders the
//! entries within each group. All three are total, side-effect-free, and
//! idempotent: the `BTreeMap` output and the stable tie-break on entry id
//! make repeated calls on the same input structurally identical. Keys with
//! no entries are simply absent.

use std::collections::BTreeMap;

use crate::api::{RoomId, ScheduleEntry, TeacherId};

/// Group entries by day of week; within each day, ascending by slot number.
pub fn by_day(entries: &[ScheduleEntry]) -> BTreeMap<u8, Vec<ScheduleEntry>> {
    let mut grouped: BTreeMap<u8, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.day_of_week)
            .or_default()
            .push(entry.clone());
    }
    for day_entries in grouped.values_mut() {
        day_entries.sort_by_key(|e| (e.slot_number, e.id));
    }
    grouped
}

/// Group entries by room; within each room, ascending by (day, slot).
pub fn by_room(entries: &[ScheduleEntry]) -> BTreeMap<RoomId, Vec<ScheduleEntry>> {
    let mut grouped: BTreeMap<RoomId, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.room_id).or_default().push(entry.clone());
    }
    for room_entries in grouped.values_mut() {
        room_entries.sort_by_key(|e| (e.day_of_week, e.slot_number, e.id));
    }
    grouped
}

/// Group entries by teacher; ordering as in [`by_room`].
pub fn by_teacher(entries: &[ScheduleEntry]) -> BTreeMap<TeacherId, Vec<ScheduleEntry>> {
    let mut grouped: BTreeMap<TeacherId, Vec<ScheduleEntry>> = BTreeMap::new();
    for entry in entries {
        grouped
            .entry(entry.teacher_id)
            .or_default()
            .push(entry.clone());
    }
    for teacher_entries in grouped.values_mut() {
        teacher_entries.sort_by_key(|e| (e.day_of_week, e.slot_number, e.id));
    }
    grouped
}
