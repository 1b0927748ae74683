//! Cumulative production counts, sharded by goods kind.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Produced-unit totals per goods name.
///
/// Design:
/// - `RwLock` for the shard map (read-heavy, write only when a new kind appears)
/// - One `AtomicU64` per kind, so concurrent producers of different kinds
///   never contend and producers of the same kind only share an atomic add
#[derive(Debug, Default)]
pub struct ProductionLedger {
    shards: RwLock<HashMap<String, Arc<AtomicU64>>>,
}

impl ProductionLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn shard(&self, kind: &str) -> Arc<AtomicU64> {
        if let Some(shard) = self.shards.read().get(kind) {
            return Arc::clone(shard);
        }
        let mut shards = self.shards.write();
        Arc::clone(shards.entry(kind.to_string()).or_default())
    }

    /// Add `units` to the total for `kind`.
    pub fn record(&self, kind: &str, units: u64) {
        self.shard(kind).fetch_add(units, Ordering::AcqRel);
    }

    /// Current total for `kind`, zero if never recorded.
    #[must_use]
    pub fn total(&self, kind: &str) -> u64 {
        self.shards
            .read()
            .get(kind)
            .map_or(0, |shard| shard.load(Ordering::Acquire))
    }

    /// Snapshot of every total, ascending by goods name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.shards
            .read()
            .iter()
            .map(|(kind, shard)| (kind.clone(), shard.load(Ordering::Acquire)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_record_accumulates() {
        let ledger = ProductionLedger::new();
        ledger.record("a", 10);
        ledger.record("a", 5);
        ledger.record("b", 0);
        assert_eq!(ledger.total("a"), 15);
        assert_eq!(ledger.total("b"), 0);
        assert_eq!(ledger.total("missing"), 0);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let ledger = ProductionLedger::new();
        ledger.record("c", 3);
        ledger.record("a", 1);
        ledger.record("b", 2);
        let keys: Vec<_> = ledger.snapshot().into_keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_concurrent_increments_same_kind() {
        let ledger = Arc::new(ProductionLedger::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for _ in 0..500 {
                        ledger.record("shared", 2);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(ledger.total("shared"), 8 * 500 * 2);
    }
}
