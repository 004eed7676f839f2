//! Shared fixtures for the dashboard integration tests

#![allow(dead_code)]

use interview_core::{DashboardConfig, Interview, InterviewId, InterviewStatus, NewInterview};
use interview_dashboard::{ApiClient, Dashboard};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::MockServer;

/// A filled-in creation form
pub fn new_interview() -> NewInterview {
    NewInterview {
        candidate_name: "Ada Lovelace".to_string(),
        phone_number: "+15550100".to_string(),
        job_position: "Backend Engineer".to_string(),
        job_description: "Builds the analytical engine".to_string(),
        skills_to_assess: "Rust, SQL".to_string(),
    }
}

/// An interview record in `status`
pub fn interview(id: i64, status: InterviewStatus) -> Interview {
    let mut interview = Interview::from_request(InterviewId(id), &new_interview());
    interview.candidate_name = format!("Candidate {id}");
    interview.status = status;
    interview
}

/// Wire form of an interview record
pub fn interview_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "candidate_name": format!("Candidate {id}"),
        "phone_number": "+15550100",
        "job_position": "Backend Engineer",
        "job_description": "Builds the analytical engine",
        "skills_to_assess": "Rust, SQL",
        "status": status,
    })
}

/// Wire form of a fully analyzed interview
pub fn completed_json(id: i64) -> Value {
    json!({
        "id": id,
        "candidate_name": format!("Candidate {id}"),
        "phone_number": "+15550100",
        "job_position": "Backend Engineer",
        "status": "completed",
        "transcript": "AI: Hello\nUser: Hi",
        "duration_in_seconds": 312,
        "recording_url": "https://recordings.example.test/call.wav",
        "analysis_summary": "Clear and confident.",
        "analysis_strengths": "- Ownership model",
        "analysis_concerns": "- Little SQL depth",
        "assessment": "Solid systems background.",
        "score": 82,
        "recommendation": "Hire",
    })
}

/// Dashboard talking to `server` over HTTP
pub fn http_dashboard(server: &MockServer) -> Dashboard {
    Dashboard::new(
        Arc::new(ApiClient::new(server.uri())),
        &DashboardConfig::default(),
    )
}
