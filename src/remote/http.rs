//! HTTP client for the scheduling service.
//!
//! Speaks the REST contract of the solver/run/offering collaborators.
//! Non-success responses are mapped to [`RemoteError::Status`] with the
//! body preserved verbatim; nothing is retried here (commit and cancel must
//! not be silently re-attempted).

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::api::{RosterData, ScheduleRun, ScheduleRunId, SemesterOffering, SemesterOfferingId};
use crate::remote::api::{OfferingApi, RemoteResult, RunApi, SolverApi};
use crate::remote::error::RemoteError;

/// Timeout for ordinary CRUD calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request timeout for `generate`. Must outlive the workflow
/// controller's generation timeout so expiry there surfaces as the
/// distinguishable still-working state instead of a transport error.
const GENERATE_REQUEST_TIMEOUT: Duration = Duration::from_secs(360);

/// reqwest-based implementation of all collaborator traits.
pub struct HttpRoutineApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoutineApi {
    /// Create a client against a service base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(
        service: &'static str,
        response: reqwest::Response,
    ) -> RemoteResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!(service, status = %status, body = %body, "collaborator call failed");
        Err(RemoteError::status(service, status.as_u16(), body))
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        what: &'static str,
        response: reqwest::Response,
    ) -> RemoteResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::decode(what, e.to_string()))
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    semester_offering_id: SemesterOfferingId,
}

#[async_trait]
impl SolverApi for HttpRoutineApi {
    async fn generate(&self, offering_id: SemesterOfferingId) -> RemoteResult<ScheduleRun> {
        let url = self.url("/v1/routines/generate");
        debug!(url = %url, offering_id = %offering_id, "requesting generation");

        let response = self
            .client
            .post(&url)
            .timeout(GENERATE_REQUEST_TIMEOUT)
            .json(&GenerateRequest {
                semester_offering_id: offering_id,
            })
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("generation service", response).await?;
        Self::decode("schedule run", response).await
    }
}

#[async_trait]
impl RunApi for HttpRoutineApi {
    async fn get_run(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun> {
        let url = self.url(&format!("/v1/routines/{}", run_id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("run service", response).await?;
        Self::decode("schedule run", response).await
    }

    async fn list_runs_by_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RemoteResult<Vec<ScheduleRun>> {
        let url = self.url(&format!(
            "/v1/semester-offerings/{}/routines",
            offering_id
        ));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("run service", response).await?;
        Self::decode("schedule run list", response).await
    }

    async fn commit(&self, run_id: ScheduleRunId) -> RemoteResult<ScheduleRun> {
        let url = self.url(&format!("/v1/routines/{}/commit", run_id));
        debug!(url = %url, "committing run");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("commit service", response).await?;
        Self::decode("schedule run", response).await
    }

    async fn cancel(&self, run_id: ScheduleRunId) -> RemoteResult<()> {
        let url = self.url(&format!("/v1/routines/{}/cancel", run_id));
        debug!(url = %url, "cancelling run");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        Self::check("commit service", response).await?;
        Ok(())
    }

    async fn delete(&self, run_id: ScheduleRunId) -> RemoteResult<()> {
        let url = self.url(&format!("/v1/routines/{}", run_id));
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        Self::check("run service", response).await?;
        Ok(())
    }
}

#[async_trait]
impl OfferingApi for HttpRoutineApi {
    async fn get_offering(&self, id: SemesterOfferingId) -> RemoteResult<SemesterOffering> {
        let url = self.url(&format!("/v1/semester-offerings/{}", id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("offering service", response).await?;
        Self::decode("semester offering", response).await
    }

    async fn get_roster(&self, id: SemesterOfferingId) -> RemoteResult<RosterData> {
        let url = self.url(&format!("/v1/semester-offerings/{}/roster", id));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        let response = Self::check("offering service", response).await?;
        Self::decode("roster", response).await
    }
}
