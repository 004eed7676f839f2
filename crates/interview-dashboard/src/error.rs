//! Error types for the dashboard controller

use interview_core::InterviewId;
use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while talking to the backend or driving the view
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API returned {status}: {}", message.as_deref().unwrap_or("no error message"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the backend's `{error}` body, if any
        message: Option<String>,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error raised by the core crate (configuration, logging)
    #[error(transparent)]
    Core(#[from] interview_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A form submission is already in flight
    #[error("A submission is already in progress")]
    SubmitInProgress,

    /// The row shows no enabled control for the requested action
    #[error("No enabled Start Call button for interview {0}")]
    ActionUnavailable(InterviewId),
}

impl DashboardError {
    /// Create an API error
    #[must_use]
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Message supplied by the backend, if it sent one
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the backend's message, or `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
