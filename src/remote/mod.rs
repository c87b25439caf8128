//! External collaborator boundary.
//!
//! The solver, the run query/commit services, and the read-only master-data
//! lookup are consumed through the traits in [`api`], allowing the backend
//! to be swapped:
//!
//! - [`local::LocalRoutineApi`]: in-memory implementation for unit tests
//!   and local development (feature `local-api`)
//! - [`http::HttpRoutineApi`]: reqwest client speaking the scheduling
//!   service's REST contract (feature `remote-api`)

#[cfg(not(any(feature = "local-api", feature = "remote-api")))]
compile_error!("Enable at least one collaborator backend feature.");

pub mod api;
pub mod error;

#[cfg(feature = "local-api")]
pub mod local;

#[cfg(feature = "remote-api")]
pub mod http;

pub use api::{OfferingApi, RemoteResult, RoutineApi, RunApi, SolverApi};
pub use error::RemoteError;

#[cfg(feature = "local-api")]
pub use local::{GenerationOutcome, LocalRoutineApi, Placement};

#[cfg(feature = "remote-api")]
pub use http::HttpRoutineApi;
