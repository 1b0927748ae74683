//! Core depot components: entities, the shared buffer, workers, and the monitor.

pub mod buffer;
pub mod cancel;
pub mod entities;
pub mod error;
pub mod ledger;
pub mod loader;
pub mod monitor;
pub mod producer;
pub mod statistics;

pub use buffer::SharedBuffer;
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use entities::{CarrierKind, GoodsKind, ProducerSource, UnitBatch};
pub use error::{AppResult, DepotError};
pub use ledger::ProductionLedger;
pub use loader::{
    CarrierSelector, DrainLoader, DrainOutcome, FixedCarrierSelector, RandomCarrierSelector,
    Shipment, ShipmentLog,
};
pub use monitor::{MonitorHandle, MonitorState, WarehouseMonitor};
pub use producer::{ProductionWorker, WorkerExit};
pub use statistics::{DepotReport, ProductAverage, ProductTotal, StatisticsCollector};
