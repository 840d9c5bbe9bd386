mod global;
mod inline;
mod pool;
mod task;

pub use global::{default_executor, init_default_pool};
pub use inline::inline;
pub use pool::Pool;
pub use task::Task;

use std::sync::Arc;

/// Anything that accepts tasks and runs each of them at most once, at any
/// later time, on any thread. The blanket impl makes every suitable closure
/// an executor, so `Arc::new(|task: Task| ...)` is a valid handle.
pub trait Executor: Send + Sync {
    fn execute(&self, task: Task);
}

pub type ExecutorHandle = Arc<dyn Executor>;

impl<F> Executor for F
where
    F: Fn(Task) + Send + Sync,
{
    fn execute(&self, task: Task) {
        self(task)
    }
}
