use super::pool::Pool;
use crate::executor::ExecutorHandle;

use std::sync::OnceLock;
use std::thread;

static DEFAULT_POOL: OnceLock<Pool> = OnceLock::new();

/// Handle to the process-wide default pool, created on first use with one
/// worker per available core. The pool lives for the rest of the process.
pub fn default_executor() -> ExecutorHandle {
    DEFAULT_POOL
        .get_or_init(|| Pool::new(default_threads()))
        .handle()
}

/// Creates the default pool with an explicit worker count, for callers that
/// need it sized before first use. Returns `false` if the pool already
/// exists.
pub fn init_default_pool(threads: usize) -> bool {
    if DEFAULT_POOL.get().is_some() {
        return false;
    }

    DEFAULT_POOL.set(Pool::new(threads)).is_ok()
}

fn default_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
}
