use super::context::enter_worker;
use super::injector::Injector;
use super::queue::LocalQueue;

use std::rc::Rc;
use std::sync::Arc;

pub(crate) struct Worker {
    id: usize,
    injector: Arc<Injector>,
}

impl Worker {
    pub(crate) fn new(id: usize, injector: Arc<Injector>) -> Self {
        Worker { id, injector }
    }

    pub(crate) fn run(self) {
        tracing::debug!(worker = self.id, "pool worker started");

        let queue = Rc::new(LocalQueue::new());
        let injector = self.injector;

        enter_worker(injector.clone(), queue.clone(), || {
            loop {
                if let Some(task) = queue.pop() {
                    task.run();
                    continue;
                }

                match injector.pop_or_park() {
                    Some(task) => task.run(),
                    None => break,
                }
            }
        });

        tracing::debug!(worker = self.id, "pool worker stopped");
    }
}
