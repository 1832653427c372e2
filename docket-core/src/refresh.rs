//! Generation tokens for fetch-then-apply sequences.
//!
//! Each fetch takes a [`Ticket`]. Starting another fetch, or changing what is
//! being looked at, moves the generation on, and results carried by an older
//! ticket are thrown away instead of overwriting newer state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl Generation {
    pub fn new() -> Self {
        Generation::default()
    }

    /// Start a fetch. Any ticket handed out before this one goes stale.
    pub fn begin(&self) -> Ticket {
        let issued = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation: Arc::clone(&self.0),
            issued,
        }
    }

    /// Make every outstanding ticket stale without starting a fetch.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }
}
