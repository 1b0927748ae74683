//! Configuration models for the simulation.

pub mod simulation;

pub use simulation::SimulationConfig;
