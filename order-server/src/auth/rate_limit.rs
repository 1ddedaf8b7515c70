//! Application-layer rate limiting for inbound actor events
//!
//! Sliding window per actor: prune timestamps older than the window, then
//! admit iff fewer than `max_requests` remain. The ledger is per-process
//! and non-durable: a courtesy guard, not a security boundary.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    /// actor id -> admission timestamps within the trailing window
    ledger: Mutex<HashMap<i64, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            ledger: Mutex::new(HashMap::new()),
        }
    }

    /// Returns `true` if the event is admitted, `false` if rate-limited.
    ///
    /// Admission records the current instant; denials record nothing.
    /// The check is synchronous and in-memory; it never blocks on I/O.
    pub fn admit(&self, actor_id: i64) -> bool {
        self.admit_at(actor_id, Instant::now())
    }

    fn admit_at(&self, actor_id: i64, now: Instant) -> bool {
        let mut ledger = self.ledger.lock();
        let times = ledger.entry(actor_id).or_default();

        // Prune-then-count over the trailing window
        times.retain(|t| now.duration_since(*t) < self.window);

        if times.len() >= self.max_requests {
            return false;
        }
        times.push(now);
        true
    }

    /// Drop actors with no admissions inside the window
    pub fn cleanup(&self) {
        let now = Instant::now();
        let mut ledger = self.ledger.lock();
        ledger.retain(|_, times| {
            times.retain(|t| now.duration_since(*t) < self.window);
            !times.is_empty()
        });
    }

    /// Number of actors currently tracked
    pub fn tracked_actors(&self) -> usize {
        self.ledger.lock().len()
    }
}
