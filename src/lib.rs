//! # Prometheus Depot
//!
//! A concurrent warehouse simulation: several factories push goods into one
//! shared warehouse buffer while a monitor watches the fill ratio and, once it
//! crosses a threshold, ships everything it can onto a randomly chosen truck.
//!
//! ## Core Problem Solved
//!
//! The interesting part is the coordination, not the bookkeeping:
//!
//! - **Many writers, one drainer**: producers never block each other; the
//!   monitor drains whatever is visible at the moment it looks
//! - **Bin-packing with overflow return**: a drain is packed onto one carrier
//!   in goods-name order and the excess goes back into the warehouse, unit for unit
//! - **Strict shutdown handshake**: producers finish, the warehouse closes,
//!   the monitor is cancelled (never mid-drain) and joined
//! - **Deterministic testing**: the clock and the carrier choice are ports,
//!   so a whole run can be replayed instantly with a fixed seed
//!
//! ## Running a Simulation
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prometheus_depot::config::SimulationConfig;
//! use prometheus_depot::runtime::Orchestrator;
//! use prometheus_depot::util::TokioClock;
//!
//! let orchestrator = Orchestrator::new(SimulationConfig::default())?;
//! let selector = orchestrator.default_selector();
//! let summary = orchestrator.run(Arc::new(TokioClock), selector).await?;
//! println!("{}", summary.report);
//! ```
//!
//! For complete examples, see:
//! - `tests/depot_scenarios_test.rs` - end-to-end scenarios and invariants
//! - `src/main.rs` - the command-line entry point

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core depot components and the drain/load algorithm.
pub mod core;
/// Configuration models for the simulation.
pub mod config;
/// Builders to construct depot components from configuration.
pub mod builders;
/// Runtime construction and the run orchestrator.
pub mod runtime;
/// Shared utilities.
pub mod util;
