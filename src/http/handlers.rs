//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! workflow controller for business logic. Confirmation dialogs and other
//! UI flow belong to the frontend; handlers only return results and errors.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    GenerateRoutineRequest, GenerateRoutineResponse, HealthResponse, JobStatusResponse,
    RunListResponse, RunViewResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{RunStatus, ScheduleRunId, SemesterOfferingId};
use crate::services::job_tracker::{JobStatus, JobTracker, LogLevel};
use crate::services::lifecycle::RoutineWorkflow;
use crate::services::{aggregation, export, validation};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    }))
}

// =============================================================================
// Routine Generation
// =============================================================================

/// POST /v1/routines/generate
///
/// Start routine generation in the background. Returns a job ID for
/// tracking progress; generation can take minutes for a constrained scope.
pub async fn generate_routine(
    State(state): State<AppState>,
    Json(request): Json<GenerateRoutineRequest>,
) -> Result<(StatusCode, Json<GenerateRoutineResponse>), AppError> {
    let offering_id = SemesterOfferingId::new(request.semester_offering_id);
    let job_id = state.job_tracker.create_job(offering_id);
    let response_job_id = job_id.clone();

    let tracker = state.job_tracker.clone();
    let workflow = state.workflow.clone();
    tokio::spawn(async move {
        run_generation_job(job_id, tracker, workflow, offering_id).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(GenerateRoutineResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Routine generation started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

/// Background task body for one generation attempt.
async fn run_generation_job(
    job_id: String,
    tracker: JobTracker,
    workflow: RoutineWorkflow,
    offering_id: SemesterOfferingId,
) {
    tracker.log(
        &job_id,
        LogLevel::Info,
        format!("Requesting generation for offering {}...", offering_id),
    );

    match workflow.generate_for(offering_id).await {
        Ok(run) => {
            match run.status {
                RunStatus::Draft => {
                    tracker.log(
                        &job_id,
                        LogLevel::Success,
                        format!(
                            "Draft run {} produced with {} entries",
                            run.id,
                            run.entries.len()
                        ),
                    );
                }
                _ => {
                    let detail = run
                        .meta
                        .as_ref()
                        .map(|report| {
                            format!(
                                "{}/{} blocks placed",
                                report.placed_blocks, report.total_blocks
                            )
                        })
                        .unwrap_or_else(|| "no report".to_string());
                    tracker.log(
                        &job_id,
                        LogLevel::Warning,
                        format!("Generation infeasible for run {} ({})", run.id, detail),
                    );
                }
            }
            tracker.complete_job(&job_id, serde_json::to_value(&run).ok());
        }
        Err(e) => {
            tracker.fail_job(&job_id, e.to_string());
        }
    }
}

// =============================================================================
// Run Lifecycle
// =============================================================================

/// GET /v1/routines/{run_id}
///
/// View a run: loads its entries into the session store (whatever its
/// status) and returns the run with its derived projections.
pub async fn view_run(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> HandlerResult<RunViewResponse> {
    let run = state.workflow.view(ScheduleRunId::new(run_id)).await?;

    Ok(Json(RunViewResponse {
        by_day: aggregation::by_day(&run.entries),
        by_room: aggregation::by_room(&run.entries),
        by_teacher: aggregation::by_teacher(&run.entries),
        run,
    }))
}

/// GET /v1/semester-offerings/{offering_id}/routines
///
/// Generation history for an offering, most recent first.
pub async fn list_runs(
    State(state): State<AppState>,
    Path(offering_id): Path<i64>,
) -> HandlerResult<RunListResponse> {
    let runs = state
        .workflow
        .list_runs(SemesterOfferingId::new(offering_id))
        .await?;
    let total = runs.len();

    Ok(Json(RunListResponse { runs, total }))
}

/// POST /v1/routines/{run_id}/commit
///
/// Commit a draft run. The transition guard runs against the freshest
/// server-side state of the run, then the server confirms the transition.
pub async fn commit_run(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> HandlerResult<crate::api::ScheduleRun> {
    let run = state.workflow.fetch_run(ScheduleRunId::new(run_id)).await?;
    let committed = state.workflow.commit(&run).await?;
    Ok(Json(committed))
}

/// POST /v1/routines/{run_id}/cancel
pub async fn cancel_run(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let run = state.workflow.fetch_run(ScheduleRunId::new(run_id)).await?;
    state.workflow.cancel(&run).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/routines/{run_id}
pub async fn delete_run(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let run = state.workflow.fetch_run(ScheduleRunId::new(run_id)).await?;
    state.workflow.delete(&run).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/routines/{run_id}/conflicts
///
/// Re-check the placement invariants over a run's entries.
pub async fn run_conflicts(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> HandlerResult<validation::ConflictReport> {
    let run = state.workflow.fetch_run(ScheduleRunId::new(run_id)).await?;
    Ok(Json(validation::check_entry_conflicts(&run.entries)))
}

// =============================================================================
// Export
// =============================================================================

/// GET /v1/routines/{run_id}/export
///
/// Download a run's schedule as CSV, named `<scope-label>_<ISO-date>.csv`.
pub async fn export_run(
    State(state): State<AppState>,
    Path(run_id): Path<i64>,
) -> Result<([(header::HeaderName, String); 2], String), AppError> {
    let run = state.workflow.fetch_run(ScheduleRunId::new(run_id)).await?;
    let offering = state.workflow.offering(run.semester_offering_id).await?;
    let roster = state.workflow.roster(run.semester_offering_id).await?;

    let csv = export::export_csv(&run.entries, &roster);
    let file_name =
        export::export_file_name(&offering.scope_label(), chrono::Utc::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    ))
}

// =============================================================================
// Background Job Management
// =============================================================================

/// GET /v1/jobs/{job_id}
///
/// Current status and logs of a generation job.
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        offering_id: job.offering_id,
        status: format!("{:?}", job.status).to_lowercase(),
        logs: job.logs,
        result: job.result,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream job logs via Server-Sent Events (SSE).
pub async fn stream_job_logs(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify job exists
    if state.job_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&job_id);

            // Send new logs since last check
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            // Once the job leaves Running, emit a final event and stop.
            if let Some(job) = tracker.get_job(&job_id) {
                if job.status != JobStatus::Running {
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "result": job.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
