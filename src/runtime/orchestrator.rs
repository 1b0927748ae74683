//! Orchestrator: wires the depot together and runs the shutdown handshake.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info};

use crate::builders::{build_monitor, build_workers};
use crate::config::SimulationConfig;
use crate::core::{
    cancel_pair, CancelSignal, CarrierSelector, DepotError, DepotReport, ProductionLedger,
    RandomCarrierSelector, SharedBuffer, ShipmentLog, StatisticsCollector, WorkerExit,
};
use crate::util::Clock;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Warehouse capacity in units.
    pub warehouse_capacity: usize,
    /// Final report.
    pub report: DepotReport,
    /// Every shipment, in arrival order.
    pub shipments: ShipmentLog,
    /// Units produced per goods name.
    pub produced: BTreeMap<String, u64>,
    /// Units still in the warehouse at shutdown, per goods name.
    pub resident: BTreeMap<String, u64>,
    /// How each factory's worker ended, in roster order.
    pub worker_exits: Vec<(String, WorkerExit)>,
}

impl RunSummary {
    /// Whether every produced unit is either shipped or still resident.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        let shipped = self.shipments.loaded_by_kind();
        let mut kinds: Vec<&String> = self
            .produced
            .keys()
            .chain(shipped.keys())
            .chain(self.resident.keys())
            .collect();
        kinds.sort();
        kinds.dedup();

        kinds.into_iter().all(|kind| {
            let produced = self.produced.get(kind).copied().unwrap_or(0);
            let shipped = shipped.get(kind).copied().unwrap_or(0);
            let resident = self.resident.get(kind).copied().unwrap_or(0);
            produced == shipped + resident
        })
    }
}

/// Runs one depot simulation from a validated configuration.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    config: SimulationConfig,
}

impl Orchestrator {
    /// Validate `config` and create an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidConfiguration`] before any work is started.
    pub fn new(config: SimulationConfig) -> Result<Self, DepotError> {
        config.validate().map_err(DepotError::InvalidConfiguration)?;
        Ok(Self { config })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Warehouse capacity in units.
    #[must_use]
    pub fn warehouse_capacity(&self) -> usize {
        self.config.warehouse_capacity()
    }

    /// Random selector honoring the configured seed.
    #[must_use]
    pub fn default_selector(&self) -> RandomCarrierSelector {
        self.config
            .seed
            .map_or_else(RandomCarrierSelector::from_entropy, RandomCarrierSelector::seeded)
    }

    /// Run the simulation to completion.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Task`] if a producer or the monitor panicked.
    pub async fn run<S: CarrierSelector>(
        &self,
        clock: Arc<dyn Clock>,
        selector: S,
    ) -> Result<RunSummary, DepotError> {
        let (_producer_cancel, producer_signal) = cancel_pair();
        self.run_with_cancel(clock, selector, producer_signal).await
    }

    /// Run the simulation, letting `producer_cancel` stop factories early.
    ///
    /// Handshake: every producer finishes, then the buffer is closed, then the
    /// monitor is stopped (never mid-drain) and joined.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Task`] if a producer or the monitor panicked.
    pub async fn run_with_cancel<S: CarrierSelector>(
        &self,
        clock: Arc<dyn Clock>,
        selector: S,
        producer_cancel: CancelSignal,
    ) -> Result<RunSummary, DepotError> {
        let warehouse_capacity = self.warehouse_capacity();
        let monitor = build_monitor(&self.config, selector)?;
        let monitor_handle = monitor.handle();
        let buffer = Arc::new(SharedBuffer::new());
        let ledger = Arc::new(ProductionLedger::new());
        for producer in &self.config.producers {
            ledger.record(&producer.goods.name, 0);
        }

        info!(
            capacity = warehouse_capacity,
            producers = self.config.producers.len(),
            ticks = self.config.ticks,
            "warehouse opened"
        );

        let (monitor_cancel, monitor_signal) = cancel_pair();
        let monitor_task = tokio::spawn(monitor.run(
            Arc::clone(&buffer),
            Arc::clone(&clock),
            monitor_signal,
        ));

        let (names, tasks): (Vec<_>, Vec<_>) = build_workers(&self.config)
            .into_iter()
            .map(|worker| {
                let name = worker.source().name.clone();
                let task = tokio::spawn(worker.run(
                    Arc::clone(&buffer),
                    Arc::clone(&ledger),
                    Arc::clone(&clock),
                    producer_cancel.clone(),
                ));
                (name, task)
            })
            .unzip();

        let mut worker_exits = Vec::with_capacity(names.len());
        let mut failure = None;
        for (name, result) in names.into_iter().zip(join_all(tasks).await) {
            match result {
                Ok(exit) => worker_exits.push((name, exit)),
                Err(e) => {
                    error!(factory = %name, error = %e, "production worker failed");
                    if failure.is_none() {
                        failure = Some(DepotError::Task(format!("producer `{name}`: {e}")));
                    }
                }
            }
        }
        info!("all factories finished, closing warehouse");

        buffer.close();
        monitor_handle.stop(&monitor_cancel).await;
        let shipments = monitor_task
            .await
            .map_err(|e| DepotError::Task(format!("monitor: {e}")))?;

        if let Some(err) = failure {
            return Err(err);
        }

        let produced = ledger.snapshot();
        let resident = buffer.resident_by_kind();
        let report = StatisticsCollector::collect(&shipments, &produced);
        info!(
            shipments = shipments.len(),
            resident = buffer.count(),
            "depot run complete"
        );

        Ok(RunSummary {
            warehouse_capacity,
            report,
            shipments,
            produced,
            resident,
            worker_exits,
        })
    }
}
