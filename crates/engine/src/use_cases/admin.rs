//! Operator PIN check guarding the mutating routes.

/// PIN used when none is configured.
pub const DEFAULT_ADMIN_PIN: &str = "admin123";

/// Static shared-secret gate.
#[derive(Debug, Clone)]
pub struct AdminGate {
    pin: String,
}

impl AdminGate {
    pub fn new(pin: impl Into<String>) -> Self {
        Self { pin: pin.into() }
    }

    /// Plain comparison against the configured PIN. Empty candidates never match.
    pub fn verify(&self, candidate: &str) -> bool {
        !candidate.is_empty() && candidate == self.pin
    }
}

impl Default for AdminGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PIN)
    }
}
