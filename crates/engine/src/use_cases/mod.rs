//! Use cases - Operator-facing flows that sit beside the repositories.

pub mod admin;
pub mod discovery;

pub use admin::AdminGate;
pub use discovery::{AutoDiscovery, DiscoveryStep, DISCOVERY_SCRIPT};
