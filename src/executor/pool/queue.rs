use crate::executor::Task;

use std::cell::RefCell;
use std::collections::VecDeque;

/// Worker-owned queue. Only the owning thread ever touches it, via the
/// thread-local worker context.
pub(crate) struct LocalQueue {
    inner: RefCell<VecDeque<Task>>,
}

impl LocalQueue {
    pub(crate) fn new() -> Self {
        LocalQueue {
            inner: RefCell::new(VecDeque::new()),
        }
    }

    pub(crate) fn push(&self, task: Task) {
        self.inner.borrow_mut().push_back(task);
    }

    pub(crate) fn pop(&self) -> Option<Task> {
        self.inner.borrow_mut().pop_back()
    }
}
