//! Sleep abstraction.
//!
//! The temp-name generator pauses between collision retries; this trait lets
//! tests run those retries without real delays.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Trait for pausing the current thread.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Real sleeper that uses `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSleeper;

impl RealSleeper {
    pub fn new() -> Self {
        Self
    }
}

impl Sleeper for RealSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Mock sleeper for testing - returns immediately and counts calls.
#[derive(Debug, Default)]
pub struct MockSleeper {
    calls: AtomicUsize,
}

impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `sleep` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Sleeper for MockSleeper {
    fn sleep(&self, _duration: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sleeper_returns_immediately() {
        let sleeper = MockSleeper::new();
        let start = std::time::Instant::now();
        sleeper.sleep(Duration::from_secs(100));
        assert!(start.elapsed().as_millis() < 10);
    }

    #[test]
    fn test_mock_sleeper_counts_calls() {
        let sleeper = MockSleeper::new();
        assert_eq!(sleeper.calls(), 0);

        sleeper.sleep(Duration::from_millis(1));
        sleeper.sleep(Duration::from_millis(1));

        assert_eq!(sleeper.calls(), 2);
    }

    #[test]
    fn test_real_sleeper_waits() {
        let sleeper = RealSleeper::new();
        let start = std::time::Instant::now();
        sleeper.sleep(Duration::from_millis(5));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_sleeper_trait_object() {
        let sleeper: Box<dyn Sleeper> = Box::new(MockSleeper::new());
        sleeper.sleep(Duration::from_millis(1));
    }
}
