//! Production workers: one per factory, pushing units on a tick schedule.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::{CancelSignal, ProducerSource, ProductionLedger, SharedBuffer, UnitBatch};
use crate::util::Clock;

/// How a production worker ended. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// Ran every configured tick.
    Completed {
        /// Ticks finished.
        ticks: u32,
        /// Units pushed over the worker's lifetime.
        pushed: u64,
    },
    /// The buffer was closed while pushing.
    BufferClosed {
        /// Ticks finished before the aborted one.
        ticks: u32,
        /// Units pushed over the worker's lifetime.
        pushed: u64,
    },
    /// Cancellation observed at a tick or push boundary.
    Cancelled {
        /// Ticks finished before the aborted one.
        ticks: u32,
        /// Units pushed over the worker's lifetime.
        pushed: u64,
    },
}

impl WorkerExit {
    /// Units pushed into the buffer by this worker.
    #[must_use]
    pub const fn pushed(&self) -> u64 {
        match self {
            Self::Completed { pushed, .. }
            | Self::BufferClosed { pushed, .. }
            | Self::Cancelled { pushed, .. } => *pushed,
        }
    }
}

/// Pushes one factory's output into the shared buffer for a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct ProductionWorker {
    source: Arc<ProducerSource>,
    ticks: u32,
    pace: Duration,
}

impl ProductionWorker {
    /// Create a worker running `ticks` ticks, sleeping `pace` after each.
    pub const fn new(source: Arc<ProducerSource>, ticks: u32, pace: Duration) -> Self {
        Self {
            source,
            ticks,
            pace,
        }
    }

    /// Factory this worker runs.
    #[must_use]
    pub fn source(&self) -> &ProducerSource {
        &self.source
    }

    /// Run until every tick is done, the buffer closes, or cancellation arrives.
    ///
    /// The ledger is credited with exactly the units that reached the buffer,
    /// including on an aborted tick.
    pub async fn run(
        self,
        buffer: Arc<SharedBuffer>,
        ledger: Arc<ProductionLedger>,
        clock: Arc<dyn Clock>,
        cancel: CancelSignal,
    ) -> WorkerExit {
        let factory = self.source.name.as_str();
        let kind = self.source.goods.name.as_str();
        let per_tick = self.source.units_per_tick();
        let mut pushed_total = 0u64;

        debug!(factory, kind, per_tick, ticks = self.ticks, "production worker started");

        for tick in 0..self.ticks {
            if cancel.is_cancelled() {
                info!(factory, tick, "production cancelled");
                return WorkerExit::Cancelled {
                    ticks: tick,
                    pushed: pushed_total,
                };
            }

            let mut pushed = 0u64;
            for _ in 0..per_tick {
                if buffer.push(UnitBatch::new(Arc::clone(&self.source))).is_err() {
                    ledger.record(kind, pushed);
                    pushed_total += pushed;
                    warn!(factory, tick, pushed, "buffer closed mid-tick, production stopped");
                    return WorkerExit::BufferClosed {
                        ticks: tick,
                        pushed: pushed_total,
                    };
                }
                pushed += 1;
                if cancel.is_cancelled() {
                    ledger.record(kind, pushed);
                    pushed_total += pushed;
                    info!(factory, tick, pushed, "production cancelled mid-tick");
                    return WorkerExit::Cancelled {
                        ticks: tick,
                        pushed: pushed_total,
                    };
                }
            }

            ledger.record(kind, pushed);
            pushed_total += pushed;
            info!(
                factory,
                goods = %self.source.goods,
                tick = tick + 1,
                units = pushed,
                "delivered to warehouse"
            );

            clock.sleep(self.pace).await;
        }

        debug!(factory, pushed = pushed_total, "production worker finished");
        WorkerExit::Completed {
            ticks: self.ticks,
            pushed: pushed_total,
        }
    }
}
