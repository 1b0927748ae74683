//! Drain/load algorithm: bin-packs drained units onto one carrier and
//! returns the overflow to the buffer.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::{CarrierKind, DepotError, SharedBuffer, UnitBatch};

/// Finalized record of what one carrier loaded during one drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment identifier.
    pub id: Uuid,
    /// Carrier used.
    pub carrier: CarrierKind,
    /// Units loaded per goods name. Kinds drained but not loaded appear with 0.
    pub loads: BTreeMap<String, u64>,
}

impl Shipment {
    /// Total units loaded onto the carrier.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.loads.values().sum()
    }
}

/// Append-only shipment log. Written by the monitor alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipmentLog {
    shipments: Vec<Shipment>,
}

impl ShipmentLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized shipment.
    pub fn record(&mut self, shipment: Shipment) {
        self.shipments.push(shipment);
    }

    /// Number of shipments recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    /// Whether no shipment was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    /// Recorded shipments in arrival order.
    #[must_use]
    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// Units loaded per goods name across every shipment, ascending by name.
    #[must_use]
    pub fn loaded_by_kind(&self) -> BTreeMap<String, u64> {
        let mut totals = BTreeMap::new();
        for shipment in &self.shipments {
            for (kind, loaded) in &shipment.loads {
                *totals.entry(kind.clone()).or_insert(0) += loaded;
            }
        }
        totals
    }
}

/// Randomness port for carrier choice.
pub trait CarrierSelector: Send + 'static {
    /// Pick an index in `0..fleet_len`. `fleet_len` is never zero.
    fn select(&mut self, fleet_len: usize) -> usize;
}

impl<F> CarrierSelector for F
where
    F: FnMut(usize) -> usize + Send + 'static,
{
    fn select(&mut self, fleet_len: usize) -> usize {
        self(fleet_len)
    }
}

/// Uniform carrier choice, independent every cycle.
#[derive(Debug, Clone)]
pub struct RandomCarrierSelector {
    rng: StdRng,
}

impl RandomCarrierSelector {
    /// Deterministic selector for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl CarrierSelector for RandomCarrierSelector {
    fn select(&mut self, fleet_len: usize) -> usize {
        self.rng.random_range(0..fleet_len)
    }
}

/// Always picks the same fleet index; for reproducible tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedCarrierSelector(pub usize);

impl CarrierSelector for FixedCarrierSelector {
    fn select(&mut self, fleet_len: usize) -> usize {
        self.0.min(fleet_len - 1)
    }
}

/// What a single drain did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    /// Units taken out of the buffer.
    pub drained: u64,
    /// Units loaded onto the carrier.
    pub loaded: u64,
    /// Units put back into the buffer; always `drained - loaded`.
    pub returned: u64,
    /// Shipment recorded, if the drain was non-empty.
    pub shipment_id: Option<Uuid>,
}

/// Loads drained units onto a randomly chosen carrier from a fixed fleet.
pub struct DrainLoader<S> {
    fleet: Arc<[CarrierKind]>,
    selector: S,
}

impl<S: CarrierSelector> DrainLoader<S> {
    /// Create a loader over `fleet`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidConfiguration`] for an empty fleet or a
    /// carrier with zero capacity.
    pub fn new(fleet: Arc<[CarrierKind]>, selector: S) -> Result<Self, DepotError> {
        if fleet.is_empty() {
            return Err(DepotError::InvalidConfiguration(
                "carrier fleet must not be empty".into(),
            ));
        }
        if let Some(carrier) = fleet.iter().find(|c| c.capacity == 0) {
            return Err(DepotError::InvalidConfiguration(format!(
                "carrier `{}` must have a positive capacity",
                carrier.name
            )));
        }
        Ok(Self { fleet, selector })
    }

    /// Fleet this loader picks from.
    #[must_use]
    pub fn fleet(&self) -> &[CarrierKind] {
        &self.fleet
    }

    /// Drain everything visible in `buffer` and load it.
    pub fn drain(&mut self, buffer: &SharedBuffer, log: &mut ShipmentLog) -> DrainOutcome {
        let drained = buffer.drain_all();
        self.load(drained, buffer, log)
    }

    /// Load already-drained units, returning overflow to `buffer`.
    pub fn load(
        &mut self,
        drained: Vec<UnitBatch>,
        buffer: &SharedBuffer,
        log: &mut ShipmentLog,
    ) -> DrainOutcome {
        if drained.is_empty() {
            info!("warehouse has nothing to ship");
            return DrainOutcome::default();
        }
        let drained_units = drained.len() as u64;

        let index = self.selector.select(self.fleet.len()) % self.fleet.len();
        let carrier = &self.fleet[index];
        info!(carrier = %carrier.name, capacity = carrier.capacity, "carrier arrived");

        let mut groups: BTreeMap<String, Vec<UnitBatch>> = BTreeMap::new();
        for batch in drained {
            if let Some(group) = groups.get_mut(batch.goods().name.as_str()) {
                group.push(batch);
            } else {
                groups.insert(batch.goods().name.clone(), vec![batch]);
            }
        }

        let mut remaining = usize::try_from(carrier.capacity).unwrap_or(usize::MAX);
        let mut loads = BTreeMap::new();
        let mut overflow = Vec::new();

        for (kind, mut group) in groups {
            let load = remaining.min(group.len());
            remaining -= load;
            overflow.extend(group.split_off(load));
            debug!(carrier = %carrier.name, kind = %kind, loaded = load, "group loaded");
            loads.insert(kind, load as u64);
        }

        let returned = overflow.len() as u64;
        buffer.restore(overflow);

        let shipment = Shipment {
            id: Uuid::new_v4(),
            carrier: carrier.clone(),
            loads,
        };
        let loaded = shipment.total();
        for (kind, count) in &shipment.loads {
            info!(carrier = %carrier.name, kind = %kind, count, "loaded");
        }
        info!(
            carrier = %carrier.name,
            drained = drained_units,
            loaded,
            returned,
            "shipment recorded"
        );

        let shipment_id = shipment.id;
        log.record(shipment);

        DrainOutcome {
            drained: drained_units,
            loaded,
            returned,
            shipment_id: Some(shipment_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GoodsKind, ProducerSource};

    fn fill(buffer: &SharedBuffer, goods: &str, units: usize) {
        let source = Arc::new(ProducerSource::new(
            goods.to_uppercase(),
            GoodsKind::new(goods, 1.0, "Box"),
            1.0,
        ));
        for _ in 0..units {
            buffer.push(UnitBatch::new(Arc::clone(&source))).unwrap();
        }
    }

    fn fleet(capacities: &[u32]) -> Arc<[CarrierKind]> {
        capacities
            .iter()
            .enumerate()
            .map(|(i, c)| CarrierKind::new(format!("truck-{i}"), *c))
            .collect()
    }

    #[test]
    fn test_empty_fleet_rejected() {
        let result = DrainLoader::new(fleet(&[]), FixedCarrierSelector(0));
        assert!(matches!(result, Err(DepotError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_zero_capacity_carrier_rejected() {
        let result = DrainLoader::new(fleet(&[10, 0]), FixedCarrierSelector(0));
        assert!(matches!(result, Err(DepotError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_empty_drain_records_nothing() {
        let buffer = SharedBuffer::new();
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[10]), FixedCarrierSelector(0)).unwrap();

        let outcome = loader.drain(&buffer, &mut log);

        assert_eq!(outcome, DrainOutcome::default());
        assert!(log.is_empty());
    }

    #[test]
    fn test_everything_fits() {
        let buffer = SharedBuffer::new();
        fill(&buffer, "a", 4);
        fill(&buffer, "b", 3);
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[10]), FixedCarrierSelector(0)).unwrap();

        let outcome = loader.drain(&buffer, &mut log);

        assert_eq!(outcome.drained, 7);
        assert_eq!(outcome.loaded, 7);
        assert_eq!(outcome.returned, 0);
        assert_eq!(buffer.count(), 0);
        assert_eq!(log.shipments()[0].loads.get("a"), Some(&4));
        assert_eq!(log.shipments()[0].loads.get("b"), Some(&3));
    }

    #[test]
    fn test_overflow_returns_exact_excess_in_name_order() {
        let buffer = SharedBuffer::new();
        fill(&buffer, "c", 5);
        fill(&buffer, "a", 6);
        fill(&buffer, "b", 4);
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[8]), FixedCarrierSelector(0)).unwrap();

        let outcome = loader.drain(&buffer, &mut log);

        // "a" fills 6, "b" gets the last 2, "c" is returned wholesale.
        let shipment = &log.shipments()[0];
        assert_eq!(shipment.loads.get("a"), Some(&6));
        assert_eq!(shipment.loads.get("b"), Some(&2));
        assert_eq!(shipment.loads.get("c"), Some(&0));
        assert_eq!(shipment.total(), 8);
        assert_eq!(outcome.returned, 7);
        assert_eq!(outcome.drained - outcome.loaded, outcome.returned);
        assert_eq!(buffer.count(), 7);

        let resident = buffer.resident_by_kind();
        assert_eq!(resident.get("a"), None);
        assert_eq!(resident.get("b"), Some(&2));
        assert_eq!(resident.get("c"), Some(&5));
    }

    #[test]
    fn test_interleaved_arrivals_group_by_kind() {
        let buffer = SharedBuffer::new();
        for _ in 0..50 {
            fill(&buffer, "b", 1);
            fill(&buffer, "a", 2);
        }
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[120]), FixedCarrierSelector(0)).unwrap();

        let outcome = loader.drain(&buffer, &mut log);

        let shipment = &log.shipments()[0];
        assert_eq!(shipment.loads.len(), 2);
        assert_eq!(shipment.loads.get("a"), Some(&100));
        assert_eq!(shipment.loads.get("b"), Some(&20));
        assert_eq!(outcome.returned, 30);
        assert_eq!(buffer.resident_by_kind().get("b"), Some(&30));
    }

    #[test]
    fn test_selector_picks_carrier() {
        let buffer = SharedBuffer::new();
        fill(&buffer, "a", 20);
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[5, 15]), |len: usize| len - 1).unwrap();

        loader.drain(&buffer, &mut log);

        assert_eq!(log.shipments()[0].carrier.capacity, 15);
        assert_eq!(log.shipments()[0].total(), 15);
        assert_eq!(buffer.count(), 5);
    }

    #[test]
    fn test_seeded_selector_is_reproducible_and_in_range() {
        let mut first = RandomCarrierSelector::seeded(7);
        let mut second = RandomCarrierSelector::seeded(7);
        let a: Vec<_> = (0..32).map(|_| first.select(3)).collect();
        let b: Vec<_> = (0..32).map(|_| second.select(3)).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|i| *i < 3));
    }

    #[test]
    fn test_loaded_by_kind_sums_log() {
        let buffer = SharedBuffer::new();
        let mut log = ShipmentLog::new();
        let mut loader = DrainLoader::new(fleet(&[100]), FixedCarrierSelector(0)).unwrap();

        fill(&buffer, "a", 3);
        loader.drain(&buffer, &mut log);
        fill(&buffer, "a", 2);
        fill(&buffer, "b", 1);
        loader.drain(&buffer, &mut log);

        let totals = log.loaded_by_kind();
        assert_eq!(totals.get("a"), Some(&5));
        assert_eq!(totals.get("b"), Some(&1));
        assert_eq!(log.len(), 2);
    }
}
