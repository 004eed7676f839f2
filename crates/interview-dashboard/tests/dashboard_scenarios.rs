//! End-to-end dashboard behaviour over HTTP

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

mod common;

use common::*;
use interview_core::{DashboardConfig, InterviewId, InterviewStatus};
use interview_dashboard::components::{ActionCell, OverlayTarget};
use interview_dashboard::{Action, ApiClient, Dashboard, DashboardError};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_created_interview_appears_on_top() {
    let server = MockServer::start().await;
    mount_list(&server, json!([interview_json(1, "completed")])).await;
    Mock::given(method("POST"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(201).set_body_json(interview_json(2, "pending")))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();
    dashboard.fill_form(new_interview());
    let created = dashboard.submit().await.unwrap();

    let rows = dashboard.rows();
    assert_eq!(created.id, InterviewId(2));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, InterviewId(2));
    assert_eq!(rows[0].status, InterviewStatus::Pending);
    assert_eq!(rows[0].action, ActionCell::start_call());
    dashboard.with_state(|state| {
        assert_eq!(state.form().fields, Default::default());
        assert!(!state.form().submitting);
        assert_eq!(state.form().banner, None);
    });
}

#[tokio::test]
async fn test_rejected_creation_shows_banner() {
    let server = MockServer::start().await;
    mount_list(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid phone"})))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();
    dashboard.fill_form(new_interview());

    assert!(dashboard.submit().await.is_err());
    dashboard.with_state(|state| {
        assert!(state.rows().is_empty());
        assert!(state.empty_state_visible());
        assert_eq!(state.form().banner.as_deref(), Some("Invalid phone"));
        assert!(!state.form().submitting);
        assert_eq!(state.form().fields, new_interview());
    });

    dashboard.dismiss_banner();
    assert!(dashboard.with_state(|state| state.form().banner.is_none()));
}

#[tokio::test]
async fn test_creation_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    assert!(dashboard.submit().await.is_err());
    assert_eq!(
        dashboard.with_state(|state| state.form().banner.clone()),
        Some("Failed to create interview.".to_string())
    );
}

#[tokio::test]
async fn test_list_failure_shows_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    let error = dashboard.load().await.unwrap_err();

    assert!(matches!(error, DashboardError::Api { status: 500, .. }));
    dashboard.with_state(|state| {
        assert_eq!(state.load_error(), Some("Failed to load interviews."));
        assert!(state.rows().is_empty());
    });
}

#[tokio::test]
async fn test_start_call_success_shows_timer() {
    let server = MockServer::start().await;
    mount_list(&server, json!([interview_json(5, "pending")])).await;
    Mock::given(method("POST"))
        .and(path("/api/interviews/5/start-call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(interview_json(5, "calling")))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();
    let action = dashboard.activate(InterviewId(5)).await.unwrap();

    assert_eq!(action, Some(Action::StartCall(InterviewId(5))));
    let row = dashboard.row(InterviewId(5)).unwrap();
    assert_eq!(row.status, InterviewStatus::Calling);
    match row.action {
        ActionCell::Timer(label) => assert_eq!(label.text(), "0m 00s"),
        other => panic!("Expected a timer, got {other:?}"),
    }
    dashboard.teardown();
}

#[tokio::test]
async fn test_start_call_failure_restores_button() {
    let server = MockServer::start().await;
    mount_list(&server, json!([interview_json(5, "pending")])).await;
    Mock::given(method("POST"))
        .and(path("/api/interviews/5/start-call"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream telephony error"))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();

    assert!(dashboard.start_call(InterviewId(5)).await.is_err());
    let row = dashboard.row(InterviewId(5)).unwrap();
    assert_eq!(row.action, ActionCell::start_call());
    assert_eq!(row.status, InterviewStatus::Pending);
    assert_eq!(dashboard.take_alert().as_deref(), Some("Failed to start call."));
}

#[tokio::test]
async fn test_view_report_fetches_fresh_record() {
    let server = MockServer::start().await;
    mount_list(&server, json!([interview_json(9, "completed")])).await;
    Mock::given(method("GET"))
        .and(path("/api/interviews/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed_json(9)))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();
    dashboard.activate(InterviewId(9)).await.unwrap();

    let report = dashboard.with_state(|state| state.detail().cloned()).unwrap();
    assert_eq!(report.candidate_name, "Candidate 9");
    assert_eq!(report.score, "82 / 100");
    assert_eq!(report.duration.as_deref(), Some("5m 12s"));
    assert_eq!(report.recording_text(), "https://recordings.example.test/call.wav");

    dashboard.click_overlay(OverlayTarget::Content);
    assert!(dashboard.with_state(|state| state.detail().is_some()));
    dashboard.close_report();
    assert!(dashboard.with_state(|state| state.detail().is_none()));
}

#[tokio::test]
async fn test_poll_patches_only_changed_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            interview_json(8, "completed"),
            interview_json(7, "pending"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_list(
        &server,
        json!([
            interview_json(8, "completed"),
            interview_json(7, "calling"),
            interview_json(6, "pending"),
        ]),
    )
    .await;

    let dashboard = http_dashboard(&server);
    dashboard.load().await.unwrap();
    let untouched = dashboard.row(InterviewId(8)).unwrap();

    assert_eq!(dashboard.poll_once().await.unwrap(), 1);

    let rows = dashboard.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], untouched);
    assert_eq!(rows[1].status, InterviewStatus::Calling);
    assert!(matches!(rows[1].action, ActionCell::Timer(_)));
    assert_eq!(
        dashboard.with_state(|state| state.timers().running()),
        vec![InterviewId(7)]
    );
    dashboard.teardown();
}

#[tokio::test]
async fn test_fractional_duration_does_not_break_list() {
    let server = MockServer::start().await;
    let mut completed = completed_json(9);
    completed["duration_in_seconds"] = json!(45.7);
    mount_list(&server, json!([interview_json(1, "pending"), completed.clone()])).await;
    Mock::given(method("GET"))
        .and(path("/api/interviews/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completed))
        .mount(&server)
        .await;

    let dashboard = http_dashboard(&server);
    assert_eq!(dashboard.load().await.unwrap(), 2);
    assert_eq!(dashboard.with_state(|state| state.load_error().map(str::to_string)), None);

    dashboard.open_report(InterviewId(9)).await.unwrap();
    let report = dashboard.with_state(|state| state.detail().cloned()).unwrap();
    assert_eq!(report.duration.as_deref(), Some("0m 46s"));
}

#[tokio::test]
async fn test_teardown_discards_poll_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([interview_json(7, "pending")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/interviews"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([interview_json(7, "calling")]))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    let config = DashboardConfig {
        poll_interval_secs: 1,
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::new(Arc::new(ApiClient::new(server.uri())), &config);
    dashboard.load().await.unwrap();
    dashboard.start_polling();

    // First poll is waiting on the delayed response
    sleep(Duration::from_millis(1_200)).await;
    dashboard.teardown();
    sleep(Duration::from_millis(2_000)).await;

    assert!(!dashboard.is_polling());
    assert!(dashboard.with_state(|state| state.timers().is_empty()));
    assert_eq!(
        dashboard.row(InterviewId(7)).unwrap().status,
        InterviewStatus::Pending
    );
}
