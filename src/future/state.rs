use crate::error::Error;
use crate::executor::{Executor, ExecutorHandle, Task};

use std::mem;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// Value slot of a shared state. Transitions out of `Pending` exactly once;
/// the only transition after that is `Ready -> Taken` by a consuming reader.
pub(crate) enum Slot<T> {
    Pending,
    Ready(T),
    Failed(Error),
    Taken,
}

impl<T> Slot<T> {
    /// Input for a borrowing continuation; the value stays in place.
    pub(crate) fn cloned(&self) -> Result<T, Error>
    where
        T: Clone,
    {
        match self {
            Slot::Ready(value) => Ok(value.clone()),
            Slot::Failed(error) => Err(error.clone()),
            Slot::Taken => Err(Error::Consumed),
            Slot::Pending => unreachable!("continuation fired on a pending slot"),
        }
    }

    /// Input for a consuming continuation; a ready value is moved out and
    /// the slot becomes `Taken`.
    pub(crate) fn take(&mut self) -> Result<T, Error> {
        match self {
            Slot::Ready(_) => match mem::replace(self, Slot::Taken) {
                Slot::Ready(value) => Ok(value),
                _ => unreachable!(),
            },
            Slot::Failed(error) => Err(error.clone()),
            Slot::Taken => Err(Error::Consumed),
            Slot::Pending => unreachable!("continuation fired on a pending slot"),
        }
    }

    fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}

/// A deferred stage: the executor to submit to and a closure that extracts
/// its input from the resolved slot and returns the task to run.
pub(crate) struct Continuation<T> {
    pub(crate) executor: ExecutorHandle,
    pub(crate) stage: Box<dyn FnOnce(&mut Slot<T>) -> Task + Send>,
}

struct Inner<T> {
    slot: Slot<T>,
    continuations: Vec<Continuation<T>>,
    detached: bool,
}

/// The synchronized cell behind one chain node. Shared by the producing
/// task (through its promise) and every future handle observing it.
pub(crate) struct Shared<T> {
    executor: ExecutorHandle,
    inner: Mutex<Inner<T>>,
    ready: Condvar,
}

impl<T> Shared<T> {
    pub(crate) fn new(executor: ExecutorHandle) -> Self {
        Shared::with_slot(executor, Slot::Pending)
    }

    pub(crate) fn with_slot(executor: ExecutorHandle, slot: Slot<T>) -> Self {
        Shared {
            executor,
            inner: Mutex::new(Inner {
                slot,
                continuations: Vec::new(),
                detached: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Default executor for continuations attached without an explicit one.
    pub(crate) fn executor(&self) -> &ExecutorHandle {
        &self.executor
    }

    /// Registers a continuation: deferred while the slot is pending, fired
    /// right away otherwise. The executor is always invoked after the lock
    /// is released.
    pub(crate) fn attach(&self, continuation: Continuation<T>) {
        let fire = {
            let mut inner = self.inner.lock().unwrap();

            if inner.slot.is_pending() {
                inner.continuations.push(continuation);
                None
            } else {
                Some(((continuation.stage)(&mut inner.slot), continuation.executor))
            }
        };

        if let Some((task, executor)) = fire {
            executor.execute(task);
        }
    }

    /// Resolves the slot and fires the deferred continuations. Called
    /// exactly once per state, through the promise.
    pub(crate) fn complete(&self, result: Result<T, Error>) {
        let fired = {
            let mut inner = self.inner.lock().unwrap();

            if !inner.slot.is_pending() {
                debug_assert!(false, "shared state completed twice");
                return;
            }

            if inner.detached {
                if let Err(error) = &result {
                    tracing::debug!(%error, "detached task failed");
                }
            }

            inner.slot = match result {
                Ok(value) => Slot::Ready(value),
                Err(error) => Slot::Failed(error),
            };

            let continuations = mem::take(&mut inner.continuations);
            continuations
                .into_iter()
                .map(|c| ((c.stage)(&mut inner.slot), c.executor))
                .collect::<Vec<_>>()
        };

        self.ready.notify_all();

        for (task, executor) in fired {
            executor.execute(task);
        }
    }

    pub(crate) fn mark_detached(&self) {
        self.inner.lock().unwrap().detached = true;
    }

    pub(crate) fn try_get(&self) -> Result<Option<T>, Error>
    where
        T: Clone,
    {
        let inner = self.inner.lock().unwrap();

        match &inner.slot {
            Slot::Pending => Ok(None),
            Slot::Ready(value) => Ok(Some(value.clone())),
            Slot::Failed(error) => Err(error.clone()),
            Slot::Taken => Err(Error::Consumed),
        }
    }

    /// Consuming read. A pending state is left untouched so the caller can
    /// retry; a failed state keeps its error and reports it on every call.
    pub(crate) fn try_take(&self) -> Result<Option<T>, Error> {
        let mut inner = self.inner.lock().unwrap();

        match &inner.slot {
            Slot::Pending => Ok(None),
            Slot::Failed(error) => Err(error.clone()),
            Slot::Taken => Err(Error::Consumed),
            Slot::Ready(_) => match mem::replace(&mut inner.slot, Slot::Taken) {
                Slot::Ready(value) => Ok(Some(value)),
                _ => unreachable!(),
            },
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        !self.inner.lock().unwrap().slot.is_pending()
    }

    pub(crate) fn wait(&self) {
        let mut inner = self.inner.lock().unwrap();

        while inner.slot.is_pending() {
            inner = self.ready.wait(inner).unwrap();
        }
    }

    pub(crate) fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut inner = self.inner.lock().unwrap();

        while inner.slot.is_pending() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };

            inner = self.ready.wait_timeout(inner, remaining).unwrap().0;
        }

        true
    }
}
