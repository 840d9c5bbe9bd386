mod error;
mod executor;
mod future;

pub use error::Error;
pub use executor::{Executor, ExecutorHandle, Pool, Task, default_executor, init_default_pool, inline};
pub use future::{Future, failed, ready, spawn, when_all, when_any};
