//! Error types for pier-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A required member was absent from a payload
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}
