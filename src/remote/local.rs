//! In-memory collaborator backend for unit tests and local development.
//!
//! `LocalRoutineApi` replays scripted generation outcomes instead of
//! solving: tests queue the placements a solver would have produced and the
//! backend turns them into stored runs, enforcing the same server-side
//! guards the real service applies (DRAFT-only transitions, idempotent
//! commit/cancel retries, at most one committed run per offering).

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::api::{
    CourseOfferingId, GenerationReport, RoomId, RosterData, RunStatus, ScheduleEntry,
    ScheduleEntryId, ScheduleRun, ScheduleRunId, SemesterOffering, SemesterOfferingId, TeacherId,
};
use crate::remote::api::{OfferingApi, RemoteResult, RunApi, SolverApi};
use crate::remote::error::RemoteError;

/// One placement a scripted outcome contributes to a run.
#[derive(Debug, Clone)]
pub struct Placement {
    pub course_offering_id: CourseOfferingId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub day_of_week: u8,
    pub slot_number: u8,
    pub lab_group: Option<String>,
}

impl Placement {
    pub fn new(
        course_offering_id: i64,
        teacher_id: i64,
        room_id: i64,
        day_of_week: u8,
        slot_number: u8,
    ) -> Self {
        Self {
            course_offering_id: CourseOfferingId::new(course_offering_id),
            teacher_id: TeacherId::new(teacher_id),
            room_id: RoomId::new(room_id),
            day_of_week,
            slot_number,
            lab_group: None,
        }
    }
}

/// A scripted result for the next `generate` call.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    status: RunStatus,
    placements: Vec<Placement>,
    report: GenerationReport,
}

impl GenerationOutcome {
    /// A feasible result: a DRAFT run holding the given placements.
    pub fn draft(placements: Vec<Placement>, report: GenerationReport) -> Self {
        Self {
            status: RunStatus::Draft,
            placements,
            report,
        }
    }

    /// An infeasible result: a FAILED run with no entries.
    pub fn failed(report: GenerationReport) -> Self {
        Self {
            status: RunStatus::Failed,
            placements: Vec::new(),
            report,
        }
    }
}

#[derive(Default)]
struct Inner {
    offerings: HashMap<SemesterOfferingId, SemesterOffering>,
    rosters: HashMap<SemesterOfferingId, RosterData>,
    runs: HashMap<ScheduleRunId, ScheduleRun>,
    outcomes: VecDeque<GenerationOutcome>,
    generate_delay: Option<Duration>,
    next_run_id: i64,
    next_entry_id: i64,
}

/// In-memory implementation of all collaborator traits.
#[derive(Clone, Default)]
pub struct LocalRoutineApi {
    inner: Arc<Mutex<Inner>>,
}

impl LocalRoutineApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an offering for lookup and generation.
    pub fn seed_offering(&self, offering: SemesterOffering) {
        self.inner.lock().offerings.insert(offering.id, offering);
    }

    /// Queue the result the next `generate` call will produce.
    pub fn push_outcome(&self, outcome: GenerationOutcome) {
        self.inner.lock().outcomes.push_back(outcome);
    }

    /// Register the display-name maps served for an offering.
    pub fn seed_roster(&self, offering_id: SemesterOfferingId, roster: RosterData) {
        self.inner.lock().rosters.insert(offering_id, roster);
    }

    /// Make `generate` sleep before answering; used to exercise timeouts.
    pub fn set_generate_delay(&self, delay: Duration) {
        self.inner.lock().generate_delay = Some(delay);
    }

    /// Insert a pre-built run, e.g. to seed history in tests.
    pub fn insert_run(&self, run: ScheduleRun) {
        let mut inner = self.inner.lock();
        inner.next_run_id = inner.next_run_id.max(run.id.value());
        inner.runs.insert(run.id, run);
    }
}

#[async_trait]
impl SolverApi for LocalRoutineApi {
    async fn generate(&self, offering_id: SemesterOfferingId) -> RemoteResult<ScheduleRun> {
        let delay = self.inner.lock().generate_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.inner.lock();
        if !inner.offerings.contains_key(&offering_id) {
            return Err(RemoteError::not_found(
                "semester_offering",
                offering_id.value(),
            ));
        }

        let outcome = inner.outcomes.pop_front().ok_or_else(|| {
            RemoteError::rejected("no scripted generation outcome queued")
        })?;

        inner.next_run_id += 1;
        let run_id = ScheduleRunId::new(inner.next_run_id);

        let mut entries = Vec::with_capacity(outcome.placements.len());
        for placement in outcome.placements {
            inner.next_entry_id += 1;
            entries.push(ScheduleEntry {
                id: ScheduleEntryId::new(inner.next_entry_id),
                schedule_run_id: run_id,
                course_offering_id: placement.course_offering_id,
                teacher_id: placement.teacher_id,
                room_id: placement.room_id,
                day_of_week: placement.day_of_week,
                slot_number: placement.slot_number,
                lab_group: placement.lab_group,
            });
        }

        let run = ScheduleRun {
            id: run_id,
            semester_offering_id: offering_id,
            status: outcome.status,
            generated_at: Utc::now(),
            committed_at: None,
            meta: Some(outcome.report),
            entries,
        };
        inner.runs.insert(run_id, run.clone());
        Ok(run)
    }
}

#[async_trait]
impl RunApi for LocalRoutineApi {
    async fn get_run(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun> {
        self.inner
            .lock()
            .runs
            .get(&run_id)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("schedule_run", run_id.value()))
    }

    async fn list_runs_by_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RemoteResult<Vec<ScheduleRun>> {
        let inner = self.inner.lock();
        let mut runs: Vec<ScheduleRun> = inner
            .runs
            .values()
            .filter(|run| run.semester_offering_id == offering_id)
            .cloned()
            .collect();
        // Deliberately not sorted by recency: callers must not depend on
        // server ordering.
        runs.sort_by_key(|run| run.id);
        Ok(runs)
    }

    async fn commit(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun> {
        let mut inner = self.inner.lock();

        let offering_id = match inner.runs.get(&run_id) {
            None => return Err(RemoteError::not_found("schedule_run", run_id.value())),
            Some(run) => match run.status {
                RunStatus::Draft => run.semester_offering_id,
                // Retry of an applied commit succeeds without side effects.
                RunStatus::Committed => return Ok(run.clone()),
                status => {
                    return Err(RemoteError::rejected(format!(
                        "run {} is {} and cannot be committed",
                        run_id, status
                    )))
                }
            },
        };

        if let Some(existing) = inner.runs.values().find(|r| {
            r.semester_offering_id == offering_id && r.status == RunStatus::Committed
        }) {
            return Err(RemoteError::rejected(format!(
                "offering {} already has committed run {}; supersede it first",
                offering_id, existing.id
            )));
        }

        match inner.runs.get_mut(&run_id) {
            Some(run) => {
                run.status = RunStatus::Committed;
                run.committed_at = Some(Utc::now());
                Ok(run.clone())
            }
            None => Err(RemoteError::not_found("schedule_run", run_id.value())),
        }
    }

    async fn cancel(&self, run_id: ScheduleRunId) -> RemoteResult<()> {
        let mut inner = self.inner.lock();
        let run = inner
            .runs
            .get_mut(&run_id)
            .ok_or_else(|| RemoteError::not_found("schedule_run", run_id.value()))?;

        match run.status {
            RunStatus::Draft => {
                run.status = RunStatus::Cancelled;
                // Cancelled runs retain no live entries.
                run.entries.clear();
                Ok(())
            }
            // Retry of an applied cancel succeeds without side effects.
            RunStatus::Cancelled => Ok(()),
            status => Err(RemoteError::rejected(format!(
                "run {} is {} and cannot be cancelled",
                run_id, status
            ))),
        }
    }

    async fn delete(&self, run_id: ScheduleRunId) -> RemoteResult<()> {
        let mut inner = self.inner.lock();
        match inner.runs.get(&run_id) {
            None => Err(RemoteError::not_found("schedule_run", run_id.value())),
            Some(run) if run.status == RunStatus::Committed => Err(RemoteError::rejected(
                format!("run {} is COMMITTED and cannot be deleted", run_id),
            )),
            Some(_) => {
                inner.runs.remove(&run_id);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl OfferingApi for LocalRoutineApi {
    async fn get_offering(&self, id: SemesterOfferingId) -> RemoteResult<SemesterOffering> {
        self.inner
            .lock()
            .offerings
            .get(&id)
            .cloned()
            .ok_or_else(|| RemoteError::not_found("semester_offering", id.value()))
    }

    async fn get_roster(&self, id: SemesterOfferingId) -> RemoteResult<RosterData> {
        let inner = self.inner.lock();
        if !inner.offerings.contains_key(&id) {
            return Err(RemoteError::not_found("semester_offering", id.value()));
        }
        Ok(inner.rosters.get(&id).cloned().unwrap_or_default())
    }
}
