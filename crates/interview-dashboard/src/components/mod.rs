//! View components of the dashboard

pub mod detail;
pub mod form;
pub mod row;
pub mod timer;

pub use detail::{OverlayTarget, ReportView};
pub use form::FormState;
pub use row::{ActionCell, Row};
pub use timer::{DisplayTimer, TimerLabel, TimerRegistry};
