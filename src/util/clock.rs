//! Clock port used for producer pacing and monitor polling.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// Sleepable clock.
///
/// Pacing is cooperative: implementations only promise to suspend the caller,
/// not to be accurate.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Suspend the caller for roughly `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real-time clock backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Logical clock for tests: sleeping only yields and advances a counter.
#[derive(Debug, Default)]
pub struct LogicalClock {
    elapsed_ms: AtomicU64,
    sleeps: AtomicU64,
}

impl LogicalClock {
    /// Create a clock at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time accumulated by every sleep so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::Acquire))
    }

    /// Number of sleeps taken.
    #[must_use]
    pub fn sleeps(&self) -> u64 {
        self.sleeps.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Clock for LogicalClock {
    async fn sleep(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(ms, Ordering::AcqRel);
        self.sleeps.fetch_add(1, Ordering::AcqRel);
        tokio::task::yield_now().await;
    }
}
