//! Builders for the factory roster, carrier fleet, workers and monitor.

use std::sync::Arc;

use crate::config::SimulationConfig;
use crate::core::{
    CarrierKind, CarrierSelector, DepotError, DrainLoader, GoodsKind, ProducerSource,
    ProductionWorker, WarehouseMonitor,
};

/// Standard plant: factories "A", "B", ... producing goods "a", "b", ...
///
/// Factory `i` runs at `base_rate × (1 + 0.1 i)` units per tick; its goods
/// weigh `1 + 0.2 i` kg and ship in "Box i+1".
#[must_use]
pub fn standard_roster(count: usize, base_rate: f64) -> Vec<ProducerSource> {
    (0..count)
        .map(|i| {
            let letter = char::from(b'A' + u8::try_from(i % 26).unwrap_or(0));
            #[allow(clippy::cast_precision_loss)]
            let step = i as f64;
            let goods = GoodsKind::new(
                letter.to_ascii_lowercase().to_string(),
                1.0 + 0.2 * step,
                format!("Box {}", i + 1),
            );
            ProducerSource::new(letter.to_string(), goods, base_rate * (1.0 + 0.1 * step))
        })
        .collect()
}

/// Standard fleet: a small and a large truck.
#[must_use]
pub fn standard_fleet() -> Vec<CarrierKind> {
    vec![
        CarrierKind::new("Small truck", 150),
        CarrierKind::new("Large truck", 300),
    ]
}

/// Build one production worker per configured factory.
#[must_use]
pub fn build_workers(cfg: &SimulationConfig) -> Vec<ProductionWorker> {
    let pace = cfg.producer_pace();
    cfg.producers
        .iter()
        .cloned()
        .map(|source| ProductionWorker::new(Arc::new(source), cfg.ticks, pace))
        .collect()
}

/// Build the warehouse monitor and its drain loader from configuration.
///
/// # Errors
///
/// Returns [`DepotError::InvalidConfiguration`] if the configuration does not validate.
pub fn build_monitor<S: CarrierSelector>(
    cfg: &SimulationConfig,
    selector: S,
) -> Result<WarehouseMonitor<S>, DepotError> {
    cfg.validate().map_err(DepotError::InvalidConfiguration)?;

    let fleet: Arc<[CarrierKind]> = cfg.fleet.clone().into();
    let loader = DrainLoader::new(fleet, selector)?;
    WarehouseMonitor::new(
        cfg.warehouse_capacity(),
        cfg.fill_threshold,
        cfg.poll_interval(),
        loader,
    )
}
