//! Data Transfer Objects
//!
//! Request bodies sent to the deployment API and the envelopes its
//! responses arrive in.

pub mod auth;
pub mod response;
pub mod task;
