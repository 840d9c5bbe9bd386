mod handle;
mod join;
mod promise;
mod state;

pub use handle::Future;
pub use join::{when_all, when_any};

use crate::error::Error;
use crate::executor::{Executor, ExecutorHandle, Task};
use handle::catch;
use promise::Promise;
use state::{Shared, Slot};

use std::sync::Arc;

/// Submits `f` to the executor and returns a future over its result. A
/// panicking task resolves the future to `Error::Failed`; a task the
/// executor drops without running resolves it to `Error::Abandoned`.
pub fn spawn<T, F>(executor: ExecutorHandle, f: F) -> Future<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let state = Arc::new(Shared::new(executor.clone()));
    let promise = Promise::new(state.clone());

    executor.execute(Task::new(move || match catch(f) {
        Ok(value) => promise.set(value),
        Err(error) => promise.fail(error),
    }));

    Future { state }
}

/// A future that is already resolved to `value`. Continuations attached to
/// it fire immediately on their executor.
pub fn ready<T>(value: T, executor: ExecutorHandle) -> Future<T>
where
    T: Send + 'static,
{
    Future {
        state: Arc::new(Shared::with_slot(executor, Slot::Ready(value))),
    }
}

/// A future that is already failed with `error`.
pub fn failed<T>(error: Error, executor: ExecutorHandle) -> Future<T>
where
    T: Send + 'static,
{
    Future {
        state: Arc::new(Shared::with_slot(executor, Slot::Failed(error))),
    }
}
