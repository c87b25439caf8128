//! Error taxonomy for the routine workflow core.
//!
//! Validation and state-transition errors are always resolved locally,
//! before any network call, and are recoverable by the caller correcting
//! input. Remote failures carry the collaborator's message verbatim.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::api::{RunStatus, ScheduleRunId, SemesterOfferingId};
use crate::remote::RemoteError;

/// Result type for workflow operations.
pub type RoutineResult<T> = Result<T, RoutineError>;

/// The lifecycle operation that a transition guard rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    Commit,
    Cancel,
    Delete,
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransitionAction::Commit => "commit",
            TransitionAction::Cancel => "cancel",
            TransitionAction::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Error type for the lifecycle controller, aggregation, and export paths.
#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    /// Input rejected locally; never sent to the remote service.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A day/slot value outside the fixed time grid.
    #[error("{what} {value} is out of range ({min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    /// A commit/cancel/delete attempted on a run whose status forbids it.
    /// Checked locally before any network call.
    #[error("cannot {action} run {run_id}: status is {status}")]
    InvalidTransition {
        run_id: ScheduleRunId,
        status: RunStatus,
        action: TransitionAction,
    },

    /// Solver/network/server failure, surfaced with the underlying message.
    #[error("Remote failure: {0}")]
    Remote(#[from] RemoteError),

    /// The generation call outlived its timeout. The remote solver may still
    /// be working; listing the offering's runs is the authoritative way to
    /// discover whether a run was produced.
    #[error(
        "generation for offering {offering_id} still running after {waited:?}; \
         list the offering's runs to discover the outcome"
    )]
    GenerationTimeout {
        offering_id: SemesterOfferingId,
        waited: Duration,
    },

    /// A referenced entity could not be resolved. Aggregation and export
    /// catch this and degrade to a placeholder instead of aborting.
    #[error("unresolved {entity} reference: {id}")]
    PartialData { entity: &'static str, id: i64 },
}

impl RoutineError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an out-of-range error from the violated bound.
    pub fn out_of_range(what: &'static str, value: u8, range: RangeInclusive<u8>) -> Self {
        Self::OutOfRange {
            what,
            value,
            min: *range.start(),
            max: *range.end(),
        }
    }

    /// Create an invalid-transition error for a guarded lifecycle operation.
    pub fn invalid_transition(
        run_id: ScheduleRunId,
        status: RunStatus,
        action: TransitionAction,
    ) -> Self {
        Self::InvalidTransition {
            run_id,
            status,
            action,
        }
    }

    /// Create a partial-data error for an unresolvable reference.
    pub fn partial_data(entity: &'static str, id: i64) -> Self {
        Self::PartialData { entity, id }
    }

    /// Whether the error was produced locally, without contacting the
    /// remote service.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            Self::Remote(_) | Self::GenerationTimeout { .. }
        )
    }
}
