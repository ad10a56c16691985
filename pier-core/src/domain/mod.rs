//! Core domain types
//!
//! These types mirror the JSON shapes served by the deployment API. They are
//! read-only snapshots: pier decodes them from a response, shows them and
//! drops them. Nothing here owns the lifecycle of a pipeline or project.

pub mod pipeline;
pub mod project;
pub mod task;
pub mod user;

use chrono::{DateTime, Utc};

/// Convert an epoch-seconds timestamp from the API into a UTC datetime
///
/// Absent and out-of-range values both yield `None`.
pub fn epoch_to_datetime(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}
