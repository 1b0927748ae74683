//! Tokio runtime construction for the depot binary.

use tokio::runtime::{Builder, Runtime};

/// Worker threads needed so every factory and the monitor can run in parallel,
/// never fewer than the machine's CPU count.
#[must_use]
pub fn default_worker_threads(producers: usize) -> usize {
    num_cpus::get().max(producers + 1)
}

/// Create a multi-threaded runtime with `worker_threads` workers.
///
/// # Errors
///
/// Propagates the I/O error if the runtime cannot be built.
pub fn build_runtime(worker_threads: usize) -> Result<Runtime, std::io::Error> {
    Builder::new_multi_thread()
        .worker_threads(worker_threads.max(1))
        .thread_name("depot-worker")
        .enable_all()
        .build()
}
