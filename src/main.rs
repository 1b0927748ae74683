//! Command-line entry point: runs the standard depot simulation and prints the report.

use std::sync::Arc;

use anyhow::anyhow;
use prometheus_depot::config::SimulationConfig;
use prometheus_depot::core::AppResult;
use prometheus_depot::runtime::{build_runtime, default_worker_threads, Orchestrator};
use prometheus_depot::util::{init_tracing, TokioClock};

fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = SimulationConfig::default()
        .with_env_overrides()
        .map_err(|e| anyhow!("config invalid: {e}"))?;
    let orchestrator = Orchestrator::new(config)?;

    let worker_threads = orchestrator
        .config()
        .worker_threads
        .unwrap_or_else(|| default_worker_threads(orchestrator.config().producers.len()));
    let runtime = build_runtime(worker_threads)?;

    println!("Warehouse capacity: {} units", orchestrator.warehouse_capacity());

    let selector = orchestrator.default_selector();
    let summary = runtime.block_on(orchestrator.run(Arc::new(TokioClock), selector))?;

    println!();
    print!("{}", summary.report);
    Ok(())
}
