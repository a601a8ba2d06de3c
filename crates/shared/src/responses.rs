//! Response bodies returned by the API.

use serde::{Deserialize, Serialize};

/// Transcript of a simulated discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryLogResponse {
    pub lines: Vec<String>,
}

/// Generic error body.
///
/// Internal failures never leak details; the message is safe to display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
