//! Warehouse monitor: polls the fill ratio and serializes drain decisions.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::core::{
    CancelHandle, CancelSignal, CarrierSelector, DepotError, DrainLoader, DrainOutcome,
    SharedBuffer, ShipmentLog,
};
use crate::util::Clock;

/// Monitor lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Waiting for the next poll.
    Idle,
    /// A drain is in flight.
    Draining,
    /// Cancellation observed at a cycle boundary; terminal.
    Stopped,
}

/// Shared view of a running monitor.
///
/// Obtained before the monitor is moved into its task; lets the orchestrator
/// observe the state and stop the monitor without racing a drain.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    state: Arc<Mutex<MonitorState>>,
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl MonitorHandle {
    /// Current monitor state.
    #[must_use]
    pub fn state(&self) -> MonitorState {
        *self.state.lock()
    }

    /// Issue cancellation once no drain is in flight.
    ///
    /// Takes the drain gate first, so the signal can never land in the middle
    /// of a drain.
    pub async fn stop(&self, cancel: &CancelHandle) {
        let _gate = self.gate.lock().await;
        cancel.cancel();
        debug!("monitor cancellation issued");
    }
}

/// Single background loop deciding when the warehouse is shipped.
pub struct WarehouseMonitor<S> {
    capacity: usize,
    threshold: f64,
    poll_interval: Duration,
    loader: DrainLoader<S>,
    log: ShipmentLog,
    state: Arc<Mutex<MonitorState>>,
    /// Exclusive section around check-then-drain.
    gate: Arc<tokio::sync::Mutex<()>>,
}

impl<S: CarrierSelector> WarehouseMonitor<S> {
    /// Create a monitor for a warehouse of `capacity` units.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidConfiguration`] for a zero capacity, a
    /// threshold outside `(0, 1]`, or a zero poll interval.
    pub fn new(
        capacity: usize,
        threshold: f64,
        poll_interval: Duration,
        loader: DrainLoader<S>,
    ) -> Result<Self, DepotError> {
        if capacity == 0 {
            return Err(DepotError::InvalidConfiguration(
                "warehouse capacity must be greater than 0".into(),
            ));
        }
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(DepotError::InvalidConfiguration(format!(
                "fill threshold must be in (0, 1], got {threshold}"
            )));
        }
        if poll_interval.is_zero() {
            return Err(DepotError::InvalidConfiguration(
                "poll interval must be greater than 0".into(),
            ));
        }
        Ok(Self {
            capacity,
            threshold,
            poll_interval,
            loader,
            log: ShipmentLog::new(),
            state: Arc::new(Mutex::new(MonitorState::Idle)),
            gate: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Handle for observing and stopping this monitor.
    #[must_use]
    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            state: Arc::clone(&self.state),
            gate: Arc::clone(&self.gate),
        }
    }

    /// Current buffer count over warehouse capacity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_ratio(&self, buffer: &SharedBuffer) -> f64 {
        buffer.count() as f64 / self.capacity as f64
    }

    /// Shipments recorded so far.
    #[must_use]
    pub const fn log(&self) -> &ShipmentLog {
        &self.log
    }

    fn set_state(&self, state: MonitorState) {
        *self.state.lock() = state;
    }

    /// One poll cycle: drain if the fill ratio reached the threshold.
    ///
    /// The cancellation check, the fill-ratio read and the drain all happen
    /// under the drain gate. Returns `None` when cancellation was already
    /// issued or the warehouse was below the threshold.
    pub async fn poll_once(
        &mut self,
        buffer: &SharedBuffer,
        cancel: &CancelSignal,
    ) -> Option<DrainOutcome> {
        let gate = Arc::clone(&self.gate);
        let _guard = gate.lock().await;
        if cancel.is_cancelled() {
            return None;
        }

        let fill_ratio = self.fill_ratio(buffer);
        if fill_ratio < self.threshold {
            return None;
        }

        self.set_state(MonitorState::Draining);
        info!(
            fill = %format!("{:.2}%", fill_ratio * 100.0),
            units = buffer.count(),
            capacity = self.capacity,
            "warehouse threshold reached, unloading"
        );

        let outcome = self.loader.drain(buffer, &mut self.log);

        self.set_state(MonitorState::Idle);
        Some(outcome)
    }

    /// Poll until cancelled, then hand back the shipment log.
    ///
    /// Cancellation is only observed between cycles; a drain that has begun
    /// always runs to completion.
    pub async fn run(
        mut self,
        buffer: Arc<SharedBuffer>,
        clock: Arc<dyn Clock>,
        cancel: CancelSignal,
    ) -> ShipmentLog {
        info!(
            capacity = self.capacity,
            threshold = self.threshold,
            carriers = self.loader.fleet().len(),
            "warehouse monitor started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            self.poll_once(&buffer, &cancel).await;

            tokio::select! {
                () = clock.sleep(self.poll_interval) => {}
                () = cancel.cancelled() => {}
            }
        }

        self.set_state(MonitorState::Stopped);
        info!(shipments = self.log.len(), "warehouse monitor stopped");
        self.log
    }
}
