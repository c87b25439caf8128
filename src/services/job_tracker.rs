//! Job tracking for long-running routine generation.
//!
//! Generation is the one operation that can run for minutes. The HTTP layer
//! spawns it as a background task and hands the caller a job id, so a slow
//! solver shows up as "still working" with progress logs instead of a
//! generic timeout. Jobs live in memory for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::api::SemesterOfferingId;

/// A single progress log entry.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Generation job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

/// One tracked generation attempt.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenerationJob {
    pub job_id: String,
    pub offering_id: SemesterOfferingId,
    pub status: JobStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Payload on success (the produced run, serialized for the caller).
    pub result: Option<serde_json::Value>,
}

/// In-memory tracker for generation jobs.
#[derive(Clone, Default)]
pub struct JobTracker {
    jobs: Arc<RwLock<HashMap<String, GenerationJob>>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new running job and return its id.
    pub fn create_job(&self, offering_id: SemesterOfferingId) -> String {
        let job_id = Uuid::new_v4().to_string();
        let job = GenerationJob {
            job_id: job_id.clone(),
            offering_id,
            status: JobStatus::Running,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };
        self.jobs.write().insert(job_id.clone(), job);
        job_id
    }

    /// Append a progress log line to a job.
    pub fn log(&self, job_id: &str, level: LogLevel, message: impl Into<String>) {
        if let Some(job) = self.jobs.write().get_mut(job_id) {
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Mark a job completed with its result payload.
    pub fn complete_job(&self, job_id: &str, result: Option<serde_json::Value>) {
        if let Some(job) = self.jobs.write().get_mut(job_id) {
            job.status = JobStatus::Completed;
            job.completed_at = Some(chrono::Utc::now());
            job.result = result;
        }
    }

    /// Mark a job failed, recording the error as its final log line.
    pub fn fail_job(&self, job_id: &str, error_message: impl Into<String>) {
        if let Some(job) = self.jobs.write().get_mut(job_id) {
            job.status = JobStatus::Failed;
            job.completed_at = Some(chrono::Utc::now());
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: error_message.into(),
            });
        }
    }

    pub fn get_job(&self, job_id: &str) -> Option<GenerationJob> {
        self.jobs.read().get(job_id).cloned()
    }

    pub fn get_logs(&self, job_id: &str) -> Vec<LogEntry> {
        self.jobs
            .read()
            .get(job_id)
            .map(|job| job.logs.clone())
            .unwrap_or_default()
    }
}
