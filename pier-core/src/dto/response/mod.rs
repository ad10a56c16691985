//! Response envelopes
//!
//! Every API response is wrapped as `{code, msg, payload}`. List endpoints
//! put `{totalCount, items}` in the payload.

use serde::{Deserialize, Serialize};

/// Standard response wrapper; `code == 0` means success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub payload: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Consume the envelope, keeping the payload only if the call succeeded
    pub fn into_payload(self) -> Option<T> {
        if self.is_success() { self.payload } else { None }
    }
}

/// Page of items returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPayload<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for ItemsPayload<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }
}
