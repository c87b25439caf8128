//! Public API surface for the routine backend.
//!
//! This file consolidates the DTO types shared between the core services,
//! the collaborator clients, and the HTTP API. All types derive
//! Serialize/Deserialize for JSON serialization; field names and the status
//! enum match the wire format of the scheduling service.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::define_id_type;
use crate::error::{RoutineError, RoutineResult};

define_id_type!(i64, ScheduleRunId);
define_id_type!(i64, ScheduleEntryId);
define_id_type!(i64, SemesterOfferingId);
define_id_type!(i64, CourseOfferingId);
define_id_type!(i64, TeacherId);
define_id_type!(i64, RoomId);

/// Lifecycle status of a schedule run.
///
/// DRAFT is the only state that accepts transitions; COMMITTED, CANCELLED,
/// and FAILED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Draft,
    Committed,
    Cancelled,
    Failed,
}

impl RunStatus {
    /// Whether no further transitions are accepted from this state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Draft)
    }

    /// Whether a run in this state holds live schedule entries.
    pub fn holds_entries(&self) -> bool {
        matches!(self, RunStatus::Draft | RunStatus::Committed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStatus::Draft => "DRAFT",
            RunStatus::Committed => "COMMITTED",
            RunStatus::Cancelled => "CANCELLED",
            RunStatus::Failed => "FAILED",
        };
        write!(f, "{}", name)
    }
}

/// One placed (course, teacher, room, day, slot) tuple belonging to a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryId,
    pub schedule_run_id: ScheduleRunId,
    pub course_offering_id: CourseOfferingId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    /// 1 = Monday .. 6 = Saturday
    pub day_of_week: u8,
    /// 1..=7; slot 5 follows the lunch break after slot 4
    pub slot_number: u8,
    /// Discriminator for parallel lab placements sharing day/slot/course.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_group: Option<String>,
}

/// Generation report produced by the external solver.
///
/// Counts plus optional human-readable conflict descriptions and placement
/// suggestions. The core preserves it verbatim for display and never feeds
/// it into its own logic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    #[serde(default)]
    pub total_blocks: u32,
    #[serde(default)]
    pub placed_blocks: u32,
    #[serde(default)]
    pub unplaced_blocks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// One generation attempt for a semester offering, with its placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRun {
    pub id: ScheduleRunId,
    pub semester_offering_id: SemesterOfferingId,
    pub status: RunStatus,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<GenerationReport>,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

/// One subject scheduled within a semester offering.
///
/// Read-only here: master-data management lives in an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOffering {
    pub id: CourseOfferingId,
    pub subject_code: String,
    pub subject_name: String,
    pub is_lab: bool,
    pub weekly_required_slots: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_group: Option<String>,
}

/// The scope a timetable is generated for: programme + department + session
/// + semester number, with the course offerings to place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterOffering {
    pub id: SemesterOfferingId,
    pub programme_name: String,
    pub department_name: String,
    pub session_name: String,
    pub semester_number: u8,
    #[serde(default)]
    pub course_offerings: Vec<CourseOffering>,
}

impl SemesterOffering {
    /// Filesystem-safe label used in export file names,
    /// e.g. `BSc-CSE_CSE_Sem3`.
    pub fn scope_label(&self) -> String {
        let sanitize = |s: &str| s.trim().replace(char::is_whitespace, "-");
        format!(
            "{}_{}_Sem{}",
            sanitize(&self.programme_name),
            sanitize(&self.department_name),
            self.semester_number
        )
    }
}

/// Subject display data resolved for a course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSubject {
    pub code: String,
    pub name: String,
    pub is_lab: bool,
}

/// A named master-data reference (teacher or room).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Subject reference resolved for a course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSubjectRef {
    pub course_offering_id: CourseOfferingId,
    pub code: String,
    pub name: String,
    pub is_lab: bool,
}

/// Wire form of the resolution maps, as served by the master-data boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterData {
    #[serde(default)]
    pub subjects: Vec<RosterSubjectRef>,
    #[serde(default)]
    pub teachers: Vec<NamedRef>,
    #[serde(default)]
    pub rooms: Vec<NamedRef>,
}

/// Resolution maps from entry ids to display names.
///
/// Built by the caller from whatever master data it has on hand; lookups on
/// missing keys are the partial-data path that aggregation and export
/// degrade to placeholders.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    subjects: HashMap<CourseOfferingId, RosterSubject>,
    teachers: HashMap<TeacherId, String>,
    rooms: HashMap<RoomId, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the subject map from an offering's course list.
    pub fn from_offering(offering: &SemesterOffering) -> Self {
        let mut roster = Self::new();
        for course in &offering.course_offerings {
            roster.add_subject(
                course.id,
                RosterSubject {
                    code: course.subject_code.clone(),
                    name: course.subject_name.clone(),
                    is_lab: course.is_lab,
                },
            );
        }
        roster
    }

    /// Build the maps from their wire form.
    pub fn from_data(data: &RosterData) -> Self {
        let mut roster = Self::new();
        for subject in &data.subjects {
            roster.add_subject(
                subject.course_offering_id,
                RosterSubject {
                    code: subject.code.clone(),
                    name: subject.name.clone(),
                    is_lab: subject.is_lab,
                },
            );
        }
        for teacher in &data.teachers {
            roster.add_teacher(TeacherId::new(teacher.id), teacher.name.clone());
        }
        for room in &data.rooms {
            roster.add_room(RoomId::new(room.id), room.name.clone());
        }
        roster
    }

    pub fn add_subject(&mut self, id: CourseOfferingId, subject: RosterSubject) {
        self.subjects.insert(id, subject);
    }

    pub fn add_teacher(&mut self, id: TeacherId, name: impl Into<String>) {
        self.teachers.insert(id, name.into());
    }

    pub fn add_room(&mut self, id: RoomId, name: impl Into<String>) {
        self.rooms.insert(id, name.into());
    }

    pub fn subject(&self, id: CourseOfferingId) -> Option<&RosterSubject> {
        self.subjects.get(&id)
    }

    pub fn teacher_name(&self, id: TeacherId) -> Option<&str> {
        self.teachers.get(&id).map(String::as_str)
    }

    pub fn room_name(&self, id: RoomId) -> Option<&str> {
        self.rooms.get(&id).map(String::as_str)
    }

    /// Strict lookup for callers that cannot degrade to a placeholder.
    pub fn require_subject(&self, id: CourseOfferingId) -> RoutineResult<&RosterSubject> {
        self.subject(id)
            .ok_or_else(|| RoutineError::partial_data("course_offering", id.value()))
    }

    /// Strict lookup for callers that cannot degrade to a placeholder.
    pub fn require_teacher(&self, id: TeacherId) -> RoutineResult<&str> {
        self.teacher_name(id)
            .ok_or_else(|| RoutineError::partial_data("teacher", id.value()))
    }

    /// Strict lookup for callers that cannot degrade to a placeholder.
    pub fn require_room(&self, id: RoomId) -> RoutineResult<&str> {
        self.room_name(id)
            .ok_or_else(|| RoutineError::partial_data("room", id.value()))
    }
}
