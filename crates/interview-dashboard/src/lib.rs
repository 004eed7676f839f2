//! Dashboard for AI phone-screening interview jobs
//!
//! Lists interview jobs, creates new ones, starts their calls and shows the
//! analysis report once a call is done. A background poller keeps each row's
//! status in step with the backend, and rows whose call is in progress show a
//! live elapsed-time counter.
//!
//! The backend is reached through the [`InterviewApi`] trait. [`ApiClient`]
//! implements it over HTTP and [`MockInterviewApi`] in memory.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]
#![allow(clippy::module_name_repetitions)]

pub mod api_client;
pub mod commands;
pub mod components;
pub mod dashboard;
pub mod error;
pub mod mock;
pub mod poller;
pub mod render;
pub mod state;

pub use api_client::{ApiClient, InterviewApi};
pub use commands::{Command, CommandError};
pub use dashboard::{Action, Dashboard};
pub use error::{DashboardError, Result};
pub use mock::MockInterviewApi;
pub use poller::PollerHandle;
pub use state::DashboardState;
