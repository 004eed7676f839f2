//! In-memory interview backend for testing

use crate::api_client::InterviewApi;
use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use interview_core::{Interview, InterviewId, InterviewStatus, NewInterview};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct MockStore {
    /// Newest first, like the real backend
    interviews: Vec<Interview>,
    next_id: i64,
    list_failure: bool,
    create_failure: Option<(u16, Option<String>)>,
    start_call_failure: Option<(u16, Option<String>)>,
    list_requests: usize,
    get_requests: usize,
    start_call_requests: usize,
}

/// Mock interview backend
///
/// Mirrors the backend's observable rules: new records start `pending`,
/// only `pending` records can start a call, and the list is newest first.
/// Failures can be scripted per operation.
#[derive(Debug, Default)]
pub struct MockInterviewApi {
    store: Mutex<MockStore>,
}

impl MockInterviewApi {
    /// Create an empty mock backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the backend with `interviews`, given newest first
    #[must_use]
    pub fn with_interviews(interviews: Vec<Interview>) -> Self {
        let next_id = interviews.iter().map(|i| i.id.0).max().unwrap_or(0);
        Self {
            store: Mutex::new(MockStore {
                interviews,
                next_id,
                ..MockStore::default()
            }),
        }
    }

    /// Change the status of a stored record, as a background transition would
    pub fn set_status(&self, id: InterviewId, status: InterviewStatus) {
        if let Some(interview) = self.store.lock().interviews.iter_mut().find(|i| i.id == id) {
            interview.status = status;
        }
    }

    /// Make list requests fail (or succeed again)
    pub fn fail_list(&self, fail: bool) {
        self.store.lock().list_failure = fail;
    }

    /// Make the next creations fail with `status` and an optional `{error}` message
    pub fn fail_create(&self, status: u16, message: Option<&str>) {
        self.store.lock().create_failure = Some((status, message.map(str::to_string)));
    }

    /// Make the next call starts fail with `status` and an optional `{error}` message
    pub fn fail_start_call(&self, status: u16, message: Option<&str>) {
        self.store.lock().start_call_failure = Some((status, message.map(str::to_string)));
    }

    /// Number of list requests served
    #[must_use]
    pub fn list_requests(&self) -> usize {
        self.store.lock().list_requests
    }

    /// Number of single-record requests served
    #[must_use]
    pub fn get_requests(&self) -> usize {
        self.store.lock().get_requests
    }

    /// Number of call-start requests served
    #[must_use]
    pub fn start_call_requests(&self) -> usize {
        self.store.lock().start_call_requests
    }
}

fn not_found() -> DashboardError {
    DashboardError::api(404, None)
}

#[async_trait]
impl InterviewApi for MockInterviewApi {
    async fn list_interviews(&self) -> Result<Vec<Interview>> {
        let mut store = self.store.lock();
        store.list_requests += 1;
        if store.list_failure {
            return Err(DashboardError::api(503, None));
        }
        Ok(store.interviews.clone())
    }

    async fn get_interview(&self, id: InterviewId) -> Result<Interview> {
        let mut store = self.store.lock();
        store.get_requests += 1;
        store
            .interviews
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_interview(&self, request: &NewInterview) -> Result<Interview> {
        let mut store = self.store.lock();
        if let Some((status, message)) = store.create_failure.clone() {
            return Err(DashboardError::api(status, message));
        }
        store.next_id += 1;
        let interview = Interview::from_request(InterviewId(store.next_id), request);
        store.interviews.insert(0, interview.clone());
        Ok(interview)
    }

    async fn start_call(&self, id: InterviewId) -> Result<Interview> {
        let mut store = self.store.lock();
        store.start_call_requests += 1;
        if let Some((status, message)) = store.start_call_failure.clone() {
            return Err(DashboardError::api(status, message));
        }
        let interview = store
            .interviews
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(not_found)?;
        if interview.status != InterviewStatus::Pending {
            return Err(DashboardError::api(
                409,
                Some(format!(
                    "Interview cannot be started. Current status: {}",
                    interview.status
                )),
            ));
        }
        interview.status = InterviewStatus::Calling;
        Ok(interview.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_assigns_ids_newest_first() {
        let api = MockInterviewApi::new();
        let first = api.create_interview(&NewInterview::default()).await.unwrap();
        let second = api.create_interview(&NewInterview::default()).await.unwrap();

        assert_eq!(first.id, InterviewId(1));
        assert_eq!(second.id, InterviewId(2));
        let ids: Vec<_> = api.list_interviews().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![InterviewId(2), InterviewId(1)]);
    }

    #[tokio::test]
    async fn test_start_call_requires_pending() {
        let api = MockInterviewApi::new();
        let created = api.create_interview(&NewInterview::default()).await.unwrap();

        let started = api.start_call(created.id).await.unwrap();
        assert_eq!(started.status, InterviewStatus::Calling);

        let error = api.start_call(created.id).await.unwrap_err();
        assert_eq!(
            error.server_message(),
            Some("Interview cannot be started. Current status: calling")
        );
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let api = MockInterviewApi::new();
        api.fail_list(true);
        api.fail_create(400, Some("Missing required fields"));

        assert!(api.list_interviews().await.is_err());
        let error = api.create_interview(&NewInterview::default()).await.unwrap_err();
        assert_eq!(error.server_message(), Some("Missing required fields"));
        assert_eq!(api.list_requests(), 1);
    }
}
