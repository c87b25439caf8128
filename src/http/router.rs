//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Routine generation
        .route("/routines/generate", post(handlers::generate_routine))
        // Run lifecycle
        .route("/routines/{run_id}", get(handlers::view_run))
        .route("/routines/{run_id}", delete(handlers::delete_run))
        .route("/routines/{run_id}/commit", post(handlers::commit_run))
        .route("/routines/{run_id}/cancel", post(handlers::cancel_run))
        .route("/routines/{run_id}/export", get(handlers::export_run))
        .route("/routines/{run_id}/conflicts", get(handlers::run_conflicts))
        // Run history per offering
        .route(
            "/semester-offerings/{offering_id}/routines",
            get(handlers::list_runs),
        )
        // Job management
        .route("/jobs/{job_id}", get(handlers::get_job_status))
        .route("/jobs/{job_id}/logs", get(handlers::stream_job_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
