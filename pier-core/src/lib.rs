//! Pier Core
//!
//! Core types for the Pier deployment dashboard client.
//!
//! This crate contains:
//! - Domain types: pipelines, tasks, projects, users as served by the API
//! - DTOs: request bodies and response envelopes
//! - Normalization helpers: ordered map, key-case normalizer, `key=value` codec

pub mod domain;
pub mod dto;
pub mod error;
pub mod normalize;
pub mod ordered_map;
pub mod pairs;

pub use error::{CoreError, Result};
pub use ordered_map::OrderedMap;
