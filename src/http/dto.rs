//! Data Transfer Objects for the HTTP API.
//!
//! Run and entry DTOs are re-used from the crate's api module since they
//! already derive Serialize/Deserialize; this file adds the request bodies
//! and wrapper responses specific to the REST surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::{RoomId, ScheduleEntry, ScheduleRun, SemesterOfferingId, TeacherId};
use crate::services::job_tracker::LogEntry;

/// Request body for starting routine generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRoutineRequest {
    /// The semester offering to schedule
    pub semester_offering_id: i64,
}

/// Response for an accepted generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRoutineResponse {
    /// Job ID for tracking the background generation
    pub job_id: String,
    /// Message about the operation
    pub message: String,
}

/// Job status response for background generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub offering_id: SemesterOfferingId,
    pub status: String,
    pub logs: Vec<LogEntry>,
    /// The produced run, once the job completed
    pub result: Option<serde_json::Value>,
}

/// Run history response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunListResponse {
    /// Runs ordered most recent first
    pub runs: Vec<ScheduleRun>,
    pub total: usize,
}

/// A run together with its derived projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunViewResponse {
    pub run: ScheduleRun,
    pub by_day: BTreeMap<u8, Vec<ScheduleEntry>>,
    pub by_room: BTreeMap<RoomId, Vec<ScheduleEntry>>,
    pub by_teacher: BTreeMap<TeacherId, Vec<ScheduleEntry>>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}
