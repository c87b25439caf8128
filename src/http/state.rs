//! Application state for the HTTP server.

use crate::services::job_tracker::JobTracker;
use crate::services::lifecycle::RoutineWorkflow;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Workflow controller over the collaborator backend
    pub workflow: RoutineWorkflow,
    /// Tracker for background generation jobs
    pub job_tracker: JobTracker,
}

impl AppState {
    /// Create a new application state around a workflow controller.
    pub fn new(workflow: RoutineWorkflow) -> Self {
        Self {
            workflow,
            job_tracker: JobTracker::new(),
        }
    }
}
