use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

// Sweep stale entries once per this many acquisitions
const SWEEP_EVERY: u64 = 256;
// An entry is stale once this many windows have passed since acceptance
const STALE_WINDOWS: u32 = 3;

// Per-client cooldown table: at most one accepted request per key per
// window. Values are the Instant of the last accepted request; stale
// entries are swept lazily so the table stays bounded.
pub struct CooldownLimiter {
    window: Duration,
    last_accepted: DashMap<String, Instant>,
    acquisitions: AtomicU64,
}

impl CooldownLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: DashMap::new(),
            acquisitions: AtomicU64::new(0),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    // Non-mutating admission check. Never creates or refreshes an entry,
    // so a rejected or invalid request does not consume the client's slot.
    pub fn is_limited(&self, key: &str) -> bool {
        self.last_accepted
            .get(key)
            .map(|accepted| accepted.elapsed() < self.window)
            .unwrap_or(false)
    }

    // Check-and-record under a single entry lock: two near-simultaneous
    // requests from the same key cannot both be admitted. Returns false
    // without touching the timestamp when the window has not elapsed.
    pub fn try_acquire(&self, key: &str) -> bool {
        self.maybe_sweep();

        match self.last_accepted.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().elapsed() < self.window {
                    false
                } else {
                    slot.insert(Instant::now());
                    true
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(Instant::now());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.last_accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_accepted.is_empty()
    }

    // Drop entries whose window expired long enough ago that they can no
    // longer affect admission.
    pub fn sweep(&self) {
        let stale_after = self.window * STALE_WINDOWS;
        self.last_accepted
            .retain(|_, accepted| accepted.elapsed() < stale_after);
    }

    fn maybe_sweep(&self) {
        let n = self.acquisitions.fetch_add(1, Ordering::Relaxed);
        if n % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.sweep();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn second_request_within_window_is_rejected() {
        let limiter = CooldownLimiter::new(Duration::from_millis(80));

        assert!(limiter.try_acquire("10.0.0.1"));
        assert!(!limiter.try_acquire("10.0.0.1"));
        assert!(limiter.is_limited("10.0.0.1"));
    }

    #[test]
    fn request_after_window_elapses_is_admitted() {
        let limiter = CooldownLimiter::new(Duration::from_millis(40));

        assert!(limiter.try_acquire("10.0.0.1"));
        sleep(Duration::from_millis(50));
        assert!(!limiter.is_limited("10.0.0.1"));
        assert!(limiter.try_acquire("10.0.0.1"));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = CooldownLimiter::new(Duration::from_millis(80));

        assert!(limiter.try_acquire("10.0.0.1"));
        assert!(limiter.try_acquire("10.0.0.2"));
        assert!(!limiter.try_acquire("10.0.0.1"));
        assert!(!limiter.try_acquire("10.0.0.2"));
    }

    #[test]
    fn rejected_attempt_does_not_extend_the_window() {
        let limiter = CooldownLimiter::new(Duration::from_millis(60));

        assert!(limiter.try_acquire("10.0.0.1"));
        sleep(Duration::from_millis(40));
        // Rejected, but must not refresh the stored timestamp
        assert!(!limiter.try_acquire("10.0.0.1"));
        sleep(Duration::from_millis(30));
        assert!(limiter.try_acquire("10.0.0.1"));
    }

    #[test]
    fn checking_never_creates_an_entry() {
        let limiter = CooldownLimiter::new(Duration::from_millis(80));

        assert!(!limiter.is_limited("10.0.0.1"));
        assert!(!limiter.is_limited("10.0.0.1"));
        assert!(limiter.is_empty());
    }

    #[test]
    fn sweep_drops_stale_entries_only() {
        let limiter = CooldownLimiter::new(Duration::from_millis(10));

        assert!(limiter.try_acquire("old"));
        sleep(Duration::from_millis(40));
        assert!(limiter.try_acquire("fresh"));

        limiter.sweep();
        assert_eq!(limiter.len(), 1);
        assert!(limiter.is_limited("fresh"));
        assert!(!limiter.is_limited("old"));
    }
}
