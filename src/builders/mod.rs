//! Builders to construct depot components from configuration.

pub mod roster_builder;

pub use roster_builder::{build_monitor, build_workers, standard_fleet, standard_roster};
