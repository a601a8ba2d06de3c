//! Scripted discovery log.
//!
//! There is no real ingestion behind this: the run replays a fixed script of
//! status messages with pauses between them and touches no data.

use std::time::Duration;

/// One scripted status message and the pause that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryStep {
    pub message: &'static str,
    pub delay_ms: u64,
}

const fn step(message: &'static str, delay_ms: u64) -> DiscoveryStep {
    DiscoveryStep { message, delay_ms }
}

pub const DISCOVERY_SCRIPT: [DiscoveryStep; 11] = [
    step("Connecting to Twitter API v2 endpoint...", 800),
    step("Authenticated as @FCLootHub_Bot", 400),
    step("Scanning @EASFCMobile timeline (Last 24h)...", 1200),
    step("Found 2 potential code patterns.", 600),
    step(
        "Verifying code 'TESTCODE1' against redeem.fcm.ea.com...",
        1500,
    ),
    step("Verification failed: Code invalid or expired.", 500),
    step("Scanning r/FUTMobile subreddit...", 1000),
    step("Parsing Discord announcement channels...", 800),
    step("No new active codes discovered in this cycle.", 500),
    step("Updating cache...", 300),
    step("Sleeping for 15 minutes.", 200),
];

pub const BANNER_LINES: [&str; 2] = [
    "Initializing FC LootHub Ingestion Layer...",
    "Loading Docker containers...",
];

pub const COMPLETION_LINE: &str = "PROCESS COMPLETE. Database updated.";

/// Replays [`DISCOVERY_SCRIPT`], pacing it by `delay_scale`.
#[derive(Debug, Clone, Copy)]
pub struct AutoDiscovery {
    delay_scale: f64,
}

impl AutoDiscovery {
    /// Runs the script without waiting between steps.
    pub fn immediate() -> Self {
        Self { delay_scale: 0.0 }
    }

    /// Runs the script with its full scripted pauses.
    pub fn paced() -> Self {
        Self { delay_scale: 1.0 }
    }

    /// Multiply every scripted pause by `scale`. Zero or negative disables waiting.
    pub fn with_delay_scale(scale: f64) -> Self {
        Self {
            delay_scale: if scale.is_finite() { scale.max(0.0) } else { 0.0 },
        }
    }

    fn delay_for(&self, step: &DiscoveryStep) -> Duration {
        Duration::from_millis(step.delay_ms).mul_f64(self.delay_scale)
    }

    /// Emit each scripted message to `sink`, then wait the step's delay.
    pub async fn run(&self, mut sink: impl FnMut(&str) + Send) {
        tracing::info!(steps = DISCOVERY_SCRIPT.len(), "Running discovery script");
        for step in &DISCOVERY_SCRIPT {
            sink(step.message);
            let delay = self.delay_for(step);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Full operator-facing log: banner, script and completion line, each prefixed `> `.
    pub async fn collect_log(&self) -> Vec<String> {
        let mut lines: Vec<String> = BANNER_LINES.iter().map(|line| prompt(line)).collect();
        self.run(|message| lines.push(prompt(message))).await;
        lines.push(prompt(COMPLETION_LINE));
        lines
    }
}

impl Default for AutoDiscovery {
    fn default() -> Self {
        Self::immediate()
    }
}

fn prompt(line: &str) -> String {
    format!("> {line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_emits_every_step_in_order() {
        let mut seen = Vec::new();
        AutoDiscovery::immediate()
            .run(|message| seen.push(message.to_string()))
            .await;

        let expected: Vec<_> = DISCOVERY_SCRIPT.iter().map(|s| s.message).collect();
        assert_eq!(seen, expected);
        assert_eq!(seen.len(), 11);
    }

    #[tokio::test]
    async fn collected_log_is_framed_and_prefixed() {
        let lines = AutoDiscovery::immediate().collect_log().await;

        assert_eq!(lines.len(), BANNER_LINES.len() + DISCOVERY_SCRIPT.len() + 1);
        assert_eq!(lines[0], "> Initializing FC LootHub Ingestion Layer...");
        assert_eq!(lines[2], "> Connecting to Twitter API v2 endpoint...");
        assert_eq!(
            lines.last().map(String::as_str),
            Some("> PROCESS COMPLETE. Database updated.")
        );
        assert!(lines.iter().all(|line| line.starts_with("> ")));
    }

    #[tokio::test(start_paused = true)]
    async fn paced_run_waits_the_scripted_total() {
        let total: u64 = DISCOVERY_SCRIPT.iter().map(|s| s.delay_ms).sum();
        let started = tokio::time::Instant::now();

        AutoDiscovery::paced().run(|_| {}).await;

        assert!(started.elapsed() >= Duration::from_millis(total));
    }

    #[test]
    fn scale_is_clamped_to_non_negative() {
        let step = DISCOVERY_SCRIPT[0];
        assert!(AutoDiscovery::with_delay_scale(-2.0).delay_for(&step).is_zero());
        assert!(AutoDiscovery::with_delay_scale(f64::NAN).delay_for(&step).is_zero());
        assert_eq!(
            AutoDiscovery::with_delay_scale(0.5).delay_for(&step),
            Duration::from_millis(400)
        );
    }
}
