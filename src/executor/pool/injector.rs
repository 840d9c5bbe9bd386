use crate::executor::Task;

use std::collections::VecDeque;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

pub(crate) struct Injector {
    queue: Mutex<VecDeque<Task>>,
    condvar: Condvar,
    shutdown: AtomicBool,
}

impl Injector {
    pub(crate) fn new() -> Self {
        Injector {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    pub(crate) fn push(&self, task: Task) {
        self.queue.lock().unwrap().push_back(task);
        self.condvar.notify_one();
    }

    /// Blocks until a task is available or shutdown is requested. Once the
    /// shutdown flag is set, queued tasks are no longer handed out.
    pub(crate) fn pop_or_park(&self) -> Option<Task> {
        let mut queue = self.queue.lock().unwrap();

        loop {
            if self.shutdown.load(Ordering::Acquire) {
                return None;
            }

            if let Some(task) = queue.pop_front() {
                return Some(task);
            }

            queue = self.condvar.wait(queue).unwrap();
        }
    }

    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.condvar.notify_all();
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Drops every task left in the queue. Their observers see
    /// `Error::Abandoned`.
    pub(crate) fn drain(&self) {
        let drained = mem::take(&mut *self.queue.lock().unwrap());
        drop(drained);
    }
}
