//! Final shipment and production report.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::ShipmentLog;

/// Average units per shipment for one goods kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAverage {
    /// Goods name.
    pub name: String,
    /// Units loaded across all shipments divided by the shipment count.
    pub average: f64,
}

/// Cumulative production for one goods kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTotal {
    /// Goods name.
    pub name: String,
    /// Units produced over the run.
    pub total: u64,
}

/// The two report sections, each ascending by goods name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepotReport {
    /// Shipments recorded over the run.
    pub shipment_count: usize,
    /// Average shipped per product; empty when nothing shipped.
    pub average_shipped: Vec<ProductAverage>,
    /// Total produced per product.
    pub total_produced: Vec<ProductTotal>,
}

/// Aggregates the shipment log and production ledger into a [`DepotReport`].
pub struct StatisticsCollector;

impl StatisticsCollector {
    /// Build the report.
    ///
    /// The average denominator is the total shipment count, not the number of
    /// shipments that carried the kind.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn collect(log: &ShipmentLog, produced: &BTreeMap<String, u64>) -> DepotReport {
        let shipment_count = log.len();
        let average_shipped = if shipment_count == 0 {
            Vec::new()
        } else {
            log.loaded_by_kind()
                .into_iter()
                .map(|(name, loaded)| ProductAverage {
                    name,
                    average: loaded as f64 / shipment_count as f64,
                })
                .collect()
        };
        let total_produced = produced
            .iter()
            .map(|(name, total)| ProductTotal {
                name: name.clone(),
                total: *total,
            })
            .collect();

        DepotReport {
            shipment_count,
            average_shipped,
            total_produced,
        }
    }
}

impl fmt::Display for DepotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Average shipped per product -----")?;
        if self.shipment_count == 0 {
            writeln!(f, "No shipments occurred.")?;
        } else {
            for row in &self.average_shipped {
                writeln!(f, "- {}: {:.2}", row.name, row.average)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "----- Total produced per product -----")?;
        for row in &self.total_produced {
            writeln!(f, "- {}: {}", row.name, row.total)?;
        }
        Ok(())
    }
}
