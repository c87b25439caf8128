//! Trait definitions for the external collaborators.
//!
//! Split by concern so callers can depend on the narrowest interface;
//! [`RoutineApi`] combines all three for the workflow controller, the same
//! way a full repository trait combines per-concern repositories.

use async_trait::async_trait;

use crate::api::{RosterData, ScheduleRun, ScheduleRunId, SemesterOffering, SemesterOfferingId};
use crate::remote::error::RemoteError;

/// Result type for collaborator calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// The generation service backed by the constraint solver.
#[async_trait]
pub trait SolverApi: Send + Sync {
    /// Request a new generation attempt for an offering.
    ///
    /// Runs materially longer than ordinary calls; callers own the
    /// generation-specific timeout. Returns the created run in DRAFT (with
    /// entries) or FAILED (without), as decided by the solver.
    async fn generate(&self, offering_id: SemesterOfferingId) -> RemoteResult<ScheduleRun>;
}

/// Run queries and the commit/cancel/delete operations.
///
/// `commit` and `cancel` are idempotent-safe on the server: retrying an
/// already-applied call succeeds without repeating side effects.
#[async_trait]
pub trait RunApi: Send + Sync {
    async fn get_run(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun>;

    /// All runs for an offering; ordering is not guaranteed by the server.
    async fn list_runs_by_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RemoteResult<Vec<ScheduleRun>>;

    async fn commit(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun>;

    async fn cancel(&self, run_id: ScheduleRunId) -> RemoteResult<()>;

    async fn delete(&self, run_id: ScheduleRunId) -> RemoteResult<()>;
}

/// Read-only master-data lookup: the scope being scheduled.
#[async_trait]
pub trait OfferingApi: Send + Sync {
    async fn get_offering(&self, id: SemesterOfferingId) -> RemoteResult<SemesterOffering>;

    /// Display-name resolution maps for an offering's entries. Partial data
    /// is acceptable; consumers degrade missing names to placeholders.
    async fn get_roster(&self, id: SemesterOfferingId) -> RemoteResult<RosterData>;
}

/// All collaborator concerns behind one object-safe trait.
pub trait RoutineApi: SolverApi + RunApi + OfferingApi {}

impl<T: SolverApi + RunApi + OfferingApi> RoutineApi for T {}
