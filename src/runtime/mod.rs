//! Runtime adapters: tokio runtime construction and the run orchestrator.

pub mod orchestrator;
pub mod tokio_runtime;

pub use orchestrator::{Orchestrator, RunSummary};
pub use tokio_runtime::{build_runtime, default_worker_threads};
