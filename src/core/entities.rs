//! Immutable descriptors shared by every depot component.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A kind of goods, identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsKind {
    /// Unique goods name; reports are ordered by it.
    pub name: String,
    /// Weight of one unit in kilograms.
    pub weight: f64,
    /// Packaging the goods ship in.
    pub package_type: String,
}

impl GoodsKind {
    /// Create a goods kind.
    pub fn new(name: impl Into<String>, weight: f64, package_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            package_type: package_type.into(),
        }
    }
}

impl fmt::Display for GoodsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} kg, {})", self.name, self.weight, self.package_type)
    }
}

/// A factory producing one goods kind at a fixed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerSource {
    /// Factory name.
    pub name: String,
    /// Goods this factory produces.
    pub goods: GoodsKind,
    /// Units produced per tick; fractional parts are dropped.
    pub production_rate: f64,
}

impl ProducerSource {
    /// Create a producer source.
    pub fn new(name: impl Into<String>, goods: GoodsKind, production_rate: f64) -> Self {
        Self {
            name: name.into(),
            goods,
            production_rate,
        }
    }

    /// Whole units produced in one tick.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn units_per_tick(&self) -> u64 {
        self.production_rate.max(0.0).floor() as u64
    }
}

/// A truck type with an integer capacity in units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierKind {
    /// Carrier name.
    pub name: String,
    /// Units one carrier can hold.
    pub capacity: u32,
}

impl CarrierKind {
    /// Create a carrier kind.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// One produced unit resident in the warehouse.
#[derive(Debug, Clone)]
pub struct UnitBatch {
    /// Factory that produced the unit.
    pub source: Arc<ProducerSource>,
    /// Always 1.
    pub count: u32,
}

impl UnitBatch {
    /// Create a single-unit batch for `source`.
    pub fn new(source: Arc<ProducerSource>) -> Self {
        Self { source, count: 1 }
    }

    /// Goods kind carried by this batch.
    #[must_use]
    pub fn goods(&self) -> &GoodsKind {
        &self.source.goods
    }
}
