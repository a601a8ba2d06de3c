//! Clock and random implementations.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// Length of generated record ids.
pub const ID_LENGTH: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - lower-case base-36 ids from the thread RNG.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..ID_LENGTH)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Clock that only moves when told to (tests only).
#[cfg(test)]
pub struct ManualClock(std::sync::Mutex<DateTime<Utc>>);

#[cfg(test)]
impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(std::sync::Mutex::new(start))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Random port yielding a scripted sequence of ids, then repeating the last one.
#[cfg(test)]
pub struct SequenceRandom(std::sync::Mutex<std::collections::VecDeque<String>>);

#[cfg(test)]
impl SequenceRandom {
    pub fn new(ids: &[&str]) -> Self {
        Self(std::sync::Mutex::new(
            ids.iter().map(|id| id.to_string()).collect(),
        ))
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_id(&self) -> String {
        let mut ids = self.0.lock().unwrap();
        if ids.len() > 1 {
            ids.pop_front().unwrap_or_default()
        } else {
            ids.front().cloned().unwrap_or_default()
        }
    }
}
