//! Repository modules - Data access over the key-value store port.
//!
//! Each repository owns one stored collection, seeds it on first access and
//! serializes its own read-modify-write sequences.

mod collection;
pub mod codes;
pub mod latency;
pub mod news;

pub use codes::{CodeRepository, CODES_KEY};
pub use latency::SimulatedLatency;
pub use news::{NewsRepository, NEWS_KEY};
