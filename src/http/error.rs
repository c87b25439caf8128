//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::RoutineError;
use crate::remote::RemoteError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (malformed input)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Workflow error carrying the core taxonomy
    Workflow(RoutineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Workflow(err) => workflow_response(err),
        };

        (status, Json(error)).into_response()
    }
}

fn workflow_response(err: RoutineError) -> (StatusCode, ApiError) {
    match &err {
        RoutineError::Validation { .. } | RoutineError::OutOfRange { .. } => (
            StatusCode::BAD_REQUEST,
            ApiError::new("VALIDATION_ERROR", err.to_string()),
        ),
        RoutineError::InvalidTransition { .. } => (
            StatusCode::CONFLICT,
            ApiError::new("INVALID_STATE_TRANSITION", err.to_string()),
        ),
        RoutineError::PartialData { .. } => (
            StatusCode::NOT_FOUND,
            ApiError::new("PARTIAL_DATA", err.to_string()),
        ),
        // The solver may still be working; the caller should re-list runs.
        RoutineError::GenerationTimeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            ApiError::new("GENERATION_PENDING", err.to_string()),
        ),
        RoutineError::Remote(RemoteError::NotFound { .. })
        | RoutineError::Remote(RemoteError::Status { status: 404, .. }) => (
            StatusCode::NOT_FOUND,
            ApiError::new("NOT_FOUND", err.to_string()),
        ),
        RoutineError::Remote(_) => (
            StatusCode::BAD_GATEWAY,
            ApiError::new("REMOTE_FAILURE", err.to_string()),
        ),
    }
}

impl From<RoutineError> for AppError {
    fn from(err: RoutineError) -> Self {
        AppError::Workflow(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RunStatus, ScheduleRunId};
    use crate::error::TransitionAction;

    #[test]
    fn test_invalid_transition_maps_to_conflict() {
        let err = RoutineError::invalid_transition(
            ScheduleRunId::new(1),
            RunStatus::Failed,
            TransitionAction::Commit,
        );
        let (status, body) = workflow_response(err);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, "INVALID_STATE_TRANSITION");
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, body) = workflow_response(RoutineError::validation("empty scope"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_remote_maps_to_bad_gateway() {
        let err = RoutineError::Remote(RemoteError::transport("connection reset"));
        let (status, body) = workflow_response(err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.message.contains("connection reset"));
    }
}
