//! Monotonic request tagging
//!
//! Every outgoing request takes the next number; a response is applied only
//! if its number is still the most recently issued one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues increasing request numbers and answers "is this still current?"
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag for a new request; invalidates every earlier tag
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `seq` is the most recently issued tag
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// Most recently issued tag, 0 before the first request
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
