use super::context::try_push_local;
use super::injector::Injector;
use super::worker::Worker;
use crate::executor::{ExecutorHandle, Task};

use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Work-stealing thread pool.
///
/// Tasks submitted from outside the pool go through a shared injector queue;
/// tasks submitted from a worker thread (continuations of a running task)
/// stay on that worker's local queue.
pub struct Pool {
    injector: Arc<Injector>,
    handles: Vec<JoinHandle<()>>,
}

impl Pool {
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        let injector = Arc::new(Injector::new());

        let mut handles = Vec::with_capacity(threads);
        for id in 0..threads {
            let worker = Worker::new(id, injector.clone());
            let handle = thread::Builder::new()
                .name(format!("fluentis-worker-{id}"))
                .spawn(move || worker.run())
                .expect("failed to spawn pool worker");

            handles.push(handle);
        }

        Pool { injector, handles }
    }

    pub fn handle(&self) -> ExecutorHandle {
        let injector = self.injector.clone();

        Arc::new(move |task: Task| {
            if injector.is_shutdown() {
                tracing::trace!("task submitted to a stopped pool, dropping");
                return;
            }

            if let Some(task) = try_push_local(&injector, task) {
                injector.push(task);
            }
        })
    }

    /// Stops the workers. Tasks still queued in the injector are dropped and
    /// their observers see `Error::Abandoned`.
    pub fn shutdown(&mut self) {
        self.injector.shutdown();

        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }

        self.injector.drain();
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
