//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Key-value persistence (could swap SQLite -> browser storage, files, Redis)
//! - The remote video feed (could swap YouTube -> another catalog)
//! - Clock/Random (for testing)

mod error;
mod external;
mod store;
mod testing;

pub use error::{FeedError, RepoError};
pub use external::VideoFeedPort;
pub use store::KeyValueStore;
pub use testing::{ClockPort, RandomPort};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::MockVideoFeedPort;
#[cfg(test)]
pub use store::MockKeyValueStore;
#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};
