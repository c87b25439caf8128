//! Schedule run lifecycle controller.
//!
//! Owns the DRAFT → COMMITTED/CANCELLED state machine from the client's
//! point of view. Transition guards run locally before any network call;
//! the local view is only updated after the collaborator confirms a
//! transition (confirm-then-reflect), so a failed remote commit can never
//! leave a stale local state flip behind.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{
    Roster, RunStatus, ScheduleRun, ScheduleRunId, SemesterOffering, SemesterOfferingId,
};
use crate::error::{RoutineError, RoutineResult, TransitionAction};
use crate::remote::RoutineApi;
use crate::store::EntryStore;

/// Generation-specific timeout, much larger than ordinary CRUD call
/// timeouts: solver work is combinatorial.
pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// The client-side workflow around schedule runs.
#[derive(Clone)]
pub struct RoutineWorkflow {
    api: Arc<dyn RoutineApi>,
    store: EntryStore,
    generate_timeout: Duration,
}

impl RoutineWorkflow {
    pub fn new(api: Arc<dyn RoutineApi>) -> Self {
        Self {
            api,
            store: EntryStore::new(),
            generate_timeout: DEFAULT_GENERATE_TIMEOUT,
        }
    }

    /// Override the generation timeout (tests use a short one).
    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.generate_timeout = timeout;
        self
    }

    /// The session's schedule entry store.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Request a new generation attempt for an offering.
    ///
    /// An empty scope is rejected locally before the remote call. On a
    /// DRAFT result the returned entries are loaded into the entry store;
    /// a FAILED result (solver infeasibility) is returned as-is with its
    /// report and no entries. If the call outlives the generation timeout
    /// the solver may still be working; the resulting
    /// [`RoutineError::GenerationTimeout`] tells the caller to consult
    /// [`Self::list_runs`] for the authoritative outcome.
    pub async fn generate(&self, offering: &SemesterOffering) -> RoutineResult<ScheduleRun> {
        if offering.course_offerings.is_empty() {
            return Err(RoutineError::validation(format!(
                "semester offering {} has no course offerings to place",
                offering.id
            )));
        }

        info!(
            offering_id = %offering.id,
            course_offerings = offering.course_offerings.len(),
            "requesting routine generation"
        );

        let run = tokio::time::timeout(self.generate_timeout, self.api.generate(offering.id))
            .await
            .map_err(|_| RoutineError::GenerationTimeout {
                offering_id: offering.id,
                waited: self.generate_timeout,
            })??;

        match run.status {
            RunStatus::Draft => {
                info!(run_id = %run.id, entries = run.entries.len(), "generation produced a draft");
                self.store.load(run.id, run.entries.clone());
            }
            RunStatus::Failed => {
                warn!(run_id = %run.id, "generation reported infeasibility");
            }
            status => {
                warn!(run_id = %run.id, %status, "generation returned unexpected status");
            }
        }

        Ok(run)
    }

    /// Fetch the offering, then generate for it.
    pub async fn generate_for(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RoutineResult<ScheduleRun> {
        let offering = self.api.get_offering(offering_id).await?;
        self.generate(&offering).await
    }

    /// Commit a draft run, freezing its entries.
    ///
    /// Permitted only while the run is DRAFT; the guard is local as well as
    /// server-side, since the server must never be assumed to have accepted
    /// a stale view. Returns the server-confirmed run with `committed_at`
    /// stamped.
    pub async fn commit(&self, run: &ScheduleRun) -> RoutineResult<ScheduleRun> {
        if run.status.is_terminal() {
            return Err(RoutineError::invalid_transition(
                run.id,
                run.status,
                TransitionAction::Commit,
            ));
        }

        let committed = self.api.commit(run.id).await?;
        info!(run_id = %committed.id, "run committed");
        Ok(committed)
    }

    /// Cancel a draft run, discarding its entries.
    ///
    /// Clears the entry store if it currently holds this run's entries.
    pub async fn cancel(&self, run: &ScheduleRun) -> RoutineResult<()> {
        if run.status.is_terminal() {
            return Err(RoutineError::invalid_transition(
                run.id,
                run.status,
                TransitionAction::Cancel,
            ));
        }

        self.api.cancel(run.id).await?;
        if self.store.clear_if_current(run.id) {
            debug!(run_id = %run.id, "cleared entry store for cancelled run");
        }
        info!(run_id = %run.id, "run cancelled");
        Ok(())
    }

    /// Delete a run and its entries. COMMITTED runs cannot be deleted.
    pub async fn delete(&self, run: &ScheduleRun) -> RoutineResult<()> {
        if run.status == RunStatus::Committed {
            return Err(RoutineError::invalid_transition(
                run.id,
                run.status,
                TransitionAction::Delete,
            ));
        }

        self.api.delete(run.id).await?;
        self.store.clear_if_current(run.id);
        info!(run_id = %run.id, "run deleted");
        Ok(())
    }

    /// Generation history for an offering, most recent first.
    ///
    /// Read-only; re-sorted locally so callers never depend on server
    /// ordering.
    pub async fn list_runs(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RoutineResult<Vec<ScheduleRun>> {
        let mut runs = self.api.list_runs_by_offering(offering_id).await?;
        runs.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(runs)
    }

    /// The currently committed run for an offering, if any.
    ///
    /// Supports the caller-driven supersession step: before committing a
    /// new run, callers inspect (and explicitly retire) the incumbent.
    pub async fn committed_run(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RoutineResult<Option<ScheduleRun>> {
        let runs = self.api.list_runs_by_offering(offering_id).await?;
        Ok(runs
            .into_iter()
            .find(|run| run.status == RunStatus::Committed))
    }

    /// Fetch the scope definition from the master-data boundary.
    pub async fn offering(&self, id: SemesterOfferingId) -> RoutineResult<SemesterOffering> {
        Ok(self.api.get_offering(id).await?)
    }

    /// Fetch the display-name resolution maps for an offering.
    pub async fn roster(&self, id: SemesterOfferingId) -> RoutineResult<Roster> {
        let data = self.api.get_roster(id).await?;
        Ok(Roster::from_data(&data))
    }

    /// Fetch a run's current server-side state without touching the store.
    ///
    /// Used before guarded transitions so the local check runs against the
    /// freshest view available.
    pub async fn fetch_run(&self, run_id: ScheduleRunId) -> RoutineResult<ScheduleRun> {
        Ok(self.api.get_run(run_id).await?)
    }

    /// Load a run's entries into the store for inspection.
    ///
    /// Works for any status (a FAILED run yields its empty set) and never
    /// mutates the run.
    pub async fn view(&self, run_id: ScheduleRunId) -> RoutineResult<ScheduleRun> {
        let run = self.api.get_run(run_id).await?;
        self.store.load(run.id, run.entries.clone());
        debug!(run_id = %run.id, status = %run.status, entries = run.entries.len(), "viewing run");
        Ok(run)
    }
}
