//! Service layer: lifecycle control, aggregation, and export.
//!
//! Aggregation and export are pure functions over schedule entries; the
//! lifecycle controller orchestrates the external collaborators and the
//! entry store.

pub mod aggregation;

pub mod export;

pub mod lifecycle;

pub mod validation;

#[cfg(feature = "http-server")]
pub mod job_tracker;



#[cfg(all(test, feature = "local-api"))]
#[path = "lifecycle_tests.rs"]
mod lifecycle_tests;

pub use aggregation::{by_day, by_room, by_teacher};
pub use export::{export_csv, export_file_name};
pub use lifecycle::{RoutineWorkflow, DEFAULT_GENERATE_TIMEOUT};
pub use validation::{check_entry_conflicts, ConflictReport};
