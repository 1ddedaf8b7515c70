//! Pending submissions awaiting a signature image
//!
//! A validated submission payload is parked here until the submitter sends
//! the signature that gates sub-order creation. Entries expire after a TTL;
//! a newer payload from the same submitter replaces the parked one
//! (last-write-wins, matching the original conversation-state semantics).

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::info;

use crate::channel::SubmissionPayload;

#[derive(Debug, Clone)]
struct PendingEntry {
    payload: SubmissionPayload,
    parked_at: Instant,
}

/// Per-submitter parked submissions
#[derive(Debug)]
pub struct PendingSubmissions {
    entries: DashMap<i64, PendingEntry>,
    ttl: Duration,
}

impl PendingSubmissions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Park a submission; replaces any previous one from the same submitter
    pub fn park(&self, submitter_id: i64, payload: SubmissionPayload) {
        let previous = self.entries.insert(
            submitter_id,
            PendingEntry {
                payload,
                parked_at: Instant::now(),
            },
        );
        if previous.is_some() {
            info!(submitter_id, "replaced parked submission (last-write-wins)");
        }
    }

    /// Take the parked submission, if present and not expired
    pub fn take(&self, submitter_id: i64) -> Option<SubmissionPayload> {
        let (_, entry) = self.entries.remove(&submitter_id)?;
        if entry.parked_at.elapsed() > self.ttl {
            info!(submitter_id, "parked submission expired");
            return None;
        }
        Some(entry.payload)
    }

    /// Drop expired entries (periodic maintenance)
    pub fn prune(&self) {
        self.entries
            .retain(|_, entry| entry.parked_at.elapsed() <= self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(total: f64) -> SubmissionPayload {
        SubmissionPayload {
            total,
            ..Default::default()
        }
    }

    #[test]
    fn test_park_and_take() {
        let pending = PendingSubmissions::new(Duration::from_secs(60));
        pending.park(42, payload(100.0));

        let taken = pending.take(42).unwrap();
        assert_eq!(taken.total, 100.0);
        // Consumed: a second take yields nothing
        assert!(pending.take(42).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let pending = PendingSubmissions::new(Duration::from_secs(60));
        pending.park(42, payload(100.0));
        pending.park(42, payload(250.0));

        assert_eq!(pending.take(42).unwrap().total, 250.0);
    }

    #[test]
    fn test_expired_entry_not_released() {
        let pending = PendingSubmissions::new(Duration::from_millis(0));
        pending.park(42, payload(100.0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(pending.take(42).is_none());
    }

    #[test]
    fn test_prune() {
        let pending = PendingSubmissions::new(Duration::from_millis(0));
        pending.park(1, payload(1.0));
        pending.park(2, payload(2.0));
        std::thread::sleep(Duration::from_millis(5));
        pending.prune();
        assert!(pending.is_empty());
    }

    #[test]
    fn test_submitters_are_independent() {
        let pending = PendingSubmissions::new(Duration::from_secs(60));
        pending.park(1, payload(1.0));
        pending.park(2, payload(2.0));

        assert_eq!(pending.take(1).unwrap().total, 1.0);
        assert_eq!(pending.take(2).unwrap().total, 2.0);
    }
}
