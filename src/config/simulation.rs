//! Simulation configuration structures.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::builders::{standard_fleet, standard_roster};
use crate::core::{CarrierKind, ProducerSource};

/// Environment variable overriding [`SimulationConfig::ticks`].
pub const ENV_TICKS: &str = "DEPOT_TICKS";
/// Environment variable overriding [`SimulationConfig::tick_interval_ms`].
pub const ENV_TICK_INTERVAL_MS: &str = "DEPOT_TICK_INTERVAL_MS";
/// Environment variable overriding [`SimulationConfig::poll_interval_ms`].
pub const ENV_POLL_INTERVAL_MS: &str = "DEPOT_POLL_INTERVAL_MS";
/// Environment variable overriding [`SimulationConfig::fill_threshold`].
pub const ENV_FILL_THRESHOLD: &str = "DEPOT_FILL_THRESHOLD";
/// Environment variable overriding [`SimulationConfig::seed`].
pub const ENV_SEED: &str = "DEPOT_SEED";

/// Root simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Warehouse capacity multiplier `M`: capacity is `M` ticks of total production.
    pub warehouse_multiplier: u32,
    /// Fill ratio at or above which the warehouse is unloaded.
    pub fill_threshold: f64,
    /// Ticks each factory runs.
    pub ticks: u32,
    /// Length of one tick in milliseconds, shared among all factories.
    pub tick_interval_ms: u64,
    /// Monitor poll interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Seed for carrier selection; entropy when absent.
    pub seed: Option<u64>,
    /// Runtime worker threads; derived from the CPU count when absent.
    pub worker_threads: Option<usize>,
    /// Factory roster.
    pub producers: Vec<ProducerSource>,
    /// Carrier fleet.
    pub fleet: Vec<CarrierKind>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            warehouse_multiplier: 100,
            fill_threshold: 0.95,
            ticks: 100,
            tick_interval_ms: 1000,
            poll_interval_ms: 1000,
            seed: None,
            worker_threads: None,
            producers: standard_roster(3, 50.0),
            fleet: standard_fleet(),
        }
    }
}

impl SimulationConfig {
    /// Sum of every factory's production rate.
    #[must_use]
    pub fn total_production_rate(&self) -> f64 {
        self.producers.iter().map(|p| p.production_rate).sum()
    }

    /// `floor(M × Σ production_rate)`, in units.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn warehouse_capacity(&self) -> usize {
        let capacity = f64::from(self.warehouse_multiplier) * self.total_production_rate();
        if capacity.is_finite() && capacity > 0.0 {
            capacity.floor() as usize
        } else {
            0
        }
    }

    /// Pause each factory takes after a tick: the tick interval split across factories.
    #[must_use]
    pub fn producer_pace(&self) -> Duration {
        let workers = u32::try_from(self.producers.len().max(1)).unwrap_or(u32::MAX);
        Duration::from_millis(self.tick_interval_ms) / workers
    }

    /// Monitor poll interval.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.producers.is_empty() {
            return Err("at least one producer must be defined".into());
        }
        for producer in &self.producers {
            if !producer.production_rate.is_finite() || producer.production_rate < 0.0 {
                return Err(format!(
                    "producer `{}` has an invalid production rate {}",
                    producer.name, producer.production_rate
                ));
            }
        }
        if self.fleet.is_empty() {
            return Err("carrier fleet must not be empty".into());
        }
        if let Some(carrier) = self.fleet.iter().find(|c| c.capacity == 0) {
            return Err(format!("carrier `{}` must have a positive capacity", carrier.name));
        }
        if self.ticks == 0 {
            return Err("ticks must be greater than 0".into());
        }
        if !(self.fill_threshold > 0.0 && self.fill_threshold <= 1.0) {
            return Err(format!("fill_threshold must be in (0, 1], got {}", self.fill_threshold));
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".into());
        }
        if self.warehouse_capacity() == 0 {
            return Err("warehouse capacity must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `DEPOT_*` environment overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, String> {
        if let Some(ticks) = env_var(ENV_TICKS)? {
            self.ticks = ticks;
        }
        if let Some(ms) = env_var(ENV_TICK_INTERVAL_MS)? {
            self.tick_interval_ms = ms;
        }
        if let Some(ms) = env_var(ENV_POLL_INTERVAL_MS)? {
            self.poll_interval_ms = ms;
        }
        if let Some(threshold) = env_var(ENV_FILL_THRESHOLD)? {
            self.fill_threshold = threshold;
        }
        if let Some(seed) = env_var(ENV_SEED)? {
            self.seed = Some(seed);
        }
        Ok(self)
    }
}

fn env_var<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{key}: {e}")),
        Err(_) => Ok(None),
    }
}
