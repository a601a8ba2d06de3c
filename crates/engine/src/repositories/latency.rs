//! Artificial delays emulating a remote backend.

use std::time::Duration;

/// Per-operation simulated latency. Zero durations skip the wait entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub list_codes: Duration,
    pub add_code: Duration,
    pub add_news: Duration,
    pub remove_news: Duration,
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self::default()
    }

    /// Delays matching the hosted storefront's feel.
    pub fn storefront() -> Self {
        Self {
            list_codes: Duration::from_millis(600),
            add_code: Duration::from_millis(600),
            add_news: Duration::from_millis(500),
            remove_news: Duration::from_millis(300),
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
