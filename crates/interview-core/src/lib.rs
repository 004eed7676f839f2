//! Core types and utilities for the interview dashboard
//!
//! Holds the domain model shared between the API client and the dashboard
//! controller, the layered configuration, the core error type and the
//! logging bootstrap.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, Config, DashboardConfig, LoggingConfig};
pub use error::{Error, Result};
pub use types::{ApiErrorBody, Interview, InterviewId, InterviewStatus, NewInterview};

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr so that
/// anything the dashboard renders on stdout stays readable.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_logging(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = if format == "json" {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| Error::Other(format!("Failed to initialize logging: {e}")))
}
