//! Shared warehouse buffer: many concurrent pushers, one drainer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::core::{DepotError, UnitBatch};

/// Unordered multiset of unit batches with a closed flag.
///
/// Uses a `parking_lot::Mutex` for the item store with brief critical
/// sections and a lock-free `AtomicUsize` mirror of the length so that
/// threshold polling never contends with producers.
#[derive(Debug, Default)]
pub struct SharedBuffer {
    items: Mutex<Vec<UnitBatch>>,
    /// Lock-free live count, updated inside the item lock.
    len: AtomicUsize,
    closed: AtomicBool,
}

impl SharedBuffer {
    /// Create an empty, open buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one batch.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::BufferClosed`] once [`close`](Self::close) has been called.
    pub fn push(&self, batch: UnitBatch) -> Result<(), DepotError> {
        let mut items = self.items.lock();
        // Checked under the lock so no push lands after close() returns.
        if self.closed.load(Ordering::Acquire) {
            return Err(DepotError::BufferClosed);
        }
        items.push(batch);
        self.len.fetch_add(1, Ordering::Release);
        Ok(())
    }

    /// Put back batches a drain could not ship.
    ///
    /// Accepted even after close: these are the same logical units that were
    /// drained, not new production.
    pub fn restore(&self, batches: Vec<UnitBatch>) {
        if batches.is_empty() {
            return;
        }
        let mut items = self.items.lock();
        self.len.fetch_add(batches.len(), Ordering::Release);
        items.extend(batches);
    }

    /// Atomically remove and return everything currently visible.
    ///
    /// A push racing with this call may land either in the result or in the
    /// buffer afterwards.
    pub fn drain_all(&self) -> Vec<UnitBatch> {
        let mut items = self.items.lock();
        let drained = std::mem::take(&mut *items);
        self.len.fetch_sub(drained.len(), Ordering::Release);
        drained
    }

    /// Approximate live count, safe for threshold polling.
    #[must_use]
    pub fn count(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Reject all further pushes. Resident items stay queryable.
    pub fn close(&self) {
        let _items = self.items.lock();
        self.closed.store(true, Ordering::Release);
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Resident units per goods name, ascending.
    #[must_use]
    pub fn resident_by_kind(&self) -> BTreeMap<String, u64> {
        let items = self.items.lock();
        let mut resident = BTreeMap::new();
        for batch in items.iter() {
            *resident.entry(batch.goods().name.clone()).or_insert(0) += u64::from(batch.count);
        }
        resident
    }
}
