//! HTTP client for communicating with the interview backend

use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use interview_core::{ApiErrorBody, Interview, InterviewId, NewInterview};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Operations the dashboard needs from the interview backend
///
/// [`ApiClient`] talks to the real REST API; [`crate::MockInterviewApi`]
/// keeps records in memory for tests.
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// `GET /api/interviews`
    async fn list_interviews(&self) -> Result<Vec<Interview>>;

    /// `GET /api/interviews/{id}`
    async fn get_interview(&self, id: InterviewId) -> Result<Interview>;

    /// `POST /api/interviews`
    async fn create_interview(&self, request: &NewInterview) -> Result<Interview>;

    /// `POST /api/interviews/{id}/start-call`
    async fn start_call(&self, id: InterviewId) -> Result<Interview>;
}

/// API client for making HTTP requests to the interview backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create an API client on top of an existing `reqwest` client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Decode a success body, or turn an error status into [`DashboardError::Api`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|body| body.error);
        return Err(DashboardError::api(status.as_u16(), message));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl InterviewApi for ApiClient {
    async fn list_interviews(&self) -> Result<Vec<Interview>> {
        let response = self.client.get(self.url("/api/interviews")).send().await?;
        let interviews: Vec<Interview> = decode(response).await?;
        debug!(count = interviews.len(), "Fetched interviews");
        Ok(interviews)
    }

    async fn get_interview(&self, id: InterviewId) -> Result<Interview> {
        let response = self
            .client
            .get(self.url(&format!("/api/interviews/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn create_interview(&self, request: &NewInterview) -> Result<Interview> {
        let response = self
            .client
            .post(self.url("/api/interviews"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn start_call(&self, id: InterviewId) -> Result<Interview> {
        let response = self
            .client
            .post(self.url(&format!("/api/interviews/{id}/start-call")))
            .send()
            .await?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000///");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.url("/api/interviews"),
            "http://localhost:5000/api/interviews"
        );
    }
}
