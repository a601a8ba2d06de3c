//! Error types for port operations.

/// Storage operation errors with context for debugging.
///
/// This is the only error repositories surface to their callers.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Backend operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization of a stored blob failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }
}

/// Remote feed failures.
///
/// Never leaves the feed cache: every variant degrades to an empty feed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FeedError {
    #[error("Feed API key is not configured")]
    MissingApiKey,
    #[error("Feed request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid feed response: {0}")]
    InvalidResponse(String),
}
