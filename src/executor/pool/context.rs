//! Thread-local worker context.
//!
//! A pool worker registers itself here for the duration of its run loop, so
//! that tasks submitted from that worker (continuations scheduled while a
//! task runs) land in its local queue instead of the shared injector.

use super::injector::Injector;
use super::queue::LocalQueue;
use crate::executor::Task;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

struct WorkerContext {
    injector: Arc<Injector>,
    queue: Rc<LocalQueue>,
}

thread_local! {
    static CURRENT_WORKER: RefCell<Option<WorkerContext>> = const { RefCell::new(None) };
}

pub(crate) fn enter_worker<F, R>(injector: Arc<Injector>, queue: Rc<LocalQueue>, f: F) -> R
where
    F: FnOnce() -> R,
{
    CURRENT_WORKER.with(|current| {
        *current.borrow_mut() = Some(WorkerContext { injector, queue });
    });

    let result = f();

    CURRENT_WORKER.with(|current| {
        *current.borrow_mut() = None;
    });

    result
}

/// Pushes to the calling worker's local queue when that worker belongs to
/// the pool behind `injector`; otherwise hands the task back.
pub(crate) fn try_push_local(injector: &Arc<Injector>, task: Task) -> Option<Task> {
    CURRENT_WORKER.with(|current| match current.borrow().as_ref() {
        Some(ctx) if Arc::ptr_eq(&ctx.injector, injector) => {
            ctx.queue.push(task);
            None
        }
        _ => Some(task),
    })
}
