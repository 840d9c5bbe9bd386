use super::promise::Promise;
use super::state::{Continuation, Shared, Slot};
use crate::error::Error;
use crate::executor::{ExecutorHandle, Task, inline};

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

/// Handle to a value (or failure) produced asynchronously by a task on an
/// executor.
///
/// Continuations chain further work onto the result. The borrowing family
/// (`map`, `then`, `recover`) needs `T: Clone` because the upstream value
/// stays in place and can feed several observers; the consuming family
/// (`into_map`, `into_then`) moves the value out and works for move-only
/// types. Cloning the handle produces another observer of the same state.
pub struct Future<T> {
    pub(crate) state: Arc<Shared<T>>,
}

impl<T> Clone for Future<T> {
    fn clone(&self) -> Self {
        Future {
            state: self.state.clone(),
        }
    }
}

impl<T: Send + 'static> Future<T> {
    /// Chains a value continuation on this future's default executor.
    pub fn map<U, F>(&self, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map_on(self.state.executor().clone(), f)
    }

    /// Chains a value continuation on the given executor.
    pub fn map_on<U, F>(&self, executor: ExecutorHandle, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.attach_cloned(executor, map_stage(f))
    }

    /// Chains a future-returning continuation; the result mirrors the inner
    /// future (reduction).
    pub fn then<U, F>(&self, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        self.then_on(self.state.executor().clone(), f)
    }

    pub fn then_on<U, F>(&self, executor: ExecutorHandle, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        self.attach_cloned(executor, then_stage(f))
    }

    /// Chains a continuation that sees the full result, success or failure.
    /// Unlike `map`, it runs when the upstream failed, turning the failure
    /// back into a value.
    pub fn recover<U, F>(&self, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(Result<T, Error>) -> U + Send + 'static,
    {
        self.recover_on(self.state.executor().clone(), f)
    }

    pub fn recover_on<U, F>(&self, executor: ExecutorHandle, f: F) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        F: FnOnce(Result<T, Error>) -> U + Send + 'static,
    {
        self.attach_cloned(executor, recover_stage(f))
    }

    /// `map` for move-only payloads: consumes the handle and moves the
    /// upstream value into the continuation.
    pub fn into_map<U, F>(self, f: F) -> Future<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let executor = self.state.executor().clone();
        self.into_map_on(executor, f)
    }

    pub fn into_map_on<U, F>(self, executor: ExecutorHandle, f: F) -> Future<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.attach_taken(executor, map_stage(f))
    }

    /// `then` for move-only payloads.
    pub fn into_then<U, F>(self, f: F) -> Future<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        let executor = self.state.executor().clone();
        self.into_then_on(executor, f)
    }

    pub fn into_then_on<U, F>(self, executor: ExecutorHandle, f: F) -> Future<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Future<U> + Send + 'static,
    {
        self.attach_taken(executor, then_stage(f))
    }

    /// Non-blocking read: `Ok(None)` while pending, a copy of the value when
    /// ready, the stored failure otherwise. A failed future reports the same
    /// error on every call.
    pub fn try_get(&self) -> Result<Option<T>, Error>
    where
        T: Clone,
    {
        self.state.try_get()
    }

    /// Consuming read: moves the value out of the shared state when ready.
    /// On a pending state it returns `Ok(None)` and leaves the state
    /// untouched, so a later call is well-defined.
    pub fn try_take(&self) -> Result<Option<T>, Error> {
        self.state.try_take()
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Blocks the calling thread until the future is resolved.
    pub fn wait(&self) {
        self.state.wait();
    }

    /// Bounded `wait`; returns `false` on timeout.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        self.state.wait_for(timeout)
    }

    /// Relinquishes the handle while keeping the producing chain running to
    /// completion. A failure in a detached chain is logged at debug level
    /// and otherwise swallowed.
    pub fn detach(self) {
        self.state.mark_detached();
    }

    /// The executor continuations run on when none is given explicitly.
    pub fn executor(&self) -> ExecutorHandle {
        self.state.executor().clone()
    }

    /// Runs `f` on the given executor once this future resolves, without
    /// creating a downstream state. Used by the combinators.
    pub(crate) fn observe_on<F>(&self, executor: ExecutorHandle, f: F)
    where
        T: Clone,
        F: FnOnce(Result<T, Error>) + Send + 'static,
    {
        self.state.attach(Continuation {
            executor,
            stage: Box::new(move |slot: &mut Slot<T>| {
                let input = slot.cloned();
                Task::new(move || f(input))
            }),
        });
    }

    fn attach_cloned<U, R>(&self, executor: ExecutorHandle, run: R) -> Future<U>
    where
        T: Clone,
        U: Send + 'static,
        R: FnOnce(Result<T, Error>, Promise<U>) + Send + 'static,
    {
        let downstream = Arc::new(Shared::new(executor.clone()));
        let promise = Promise::new(downstream.clone());

        self.state.attach(Continuation {
            executor,
            stage: Box::new(move |slot: &mut Slot<T>| {
                let input = slot.cloned();
                Task::new(move || run(input, promise))
            }),
        });

        Future { state: downstream }
    }

    fn attach_taken<U, R>(&self, executor: ExecutorHandle, run: R) -> Future<U>
    where
        U: Send + 'static,
        R: FnOnce(Result<T, Error>, Promise<U>) + Send + 'static,
    {
        let downstream = Arc::new(Shared::new(executor.clone()));
        let promise = Promise::new(downstream.clone());

        self.state.attach(Continuation {
            executor,
            stage: Box::new(move |slot: &mut Slot<T>| {
                let input = slot.take();
                Task::new(move || run(input, promise))
            }),
        });

        Future { state: downstream }
    }

    /// Mirrors this future's eventual result into `promise`. Used by the
    /// reduction path; the forwarded value is moved, so returning a future
    /// from a continuation relinquishes it.
    fn forward(self, promise: Promise<T>) {
        self.state.attach(Continuation {
            executor: inline(),
            stage: Box::new(move |slot: &mut Slot<T>| {
                let result = slot.take();
                Task::new(move || promise.complete_with(result))
            }),
        });
    }
}

impl<U: Send + 'static> Future<Future<U>> {
    /// Flattens a nested future into its inner result.
    pub fn flatten(self) -> Future<U> {
        self.into_then(|inner| inner)
    }
}

pub(crate) fn catch<U>(f: impl FnOnce() -> U) -> Result<U, Error> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Error::from_panic)
}

fn map_stage<T, U, F>(f: F) -> impl FnOnce(Result<T, Error>, Promise<U>) + Send
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(T) -> U + Send + 'static,
{
    move |input, promise| match input.and_then(|value| catch(move || f(value))) {
        Ok(output) => promise.set(output),
        Err(error) => promise.fail(error),
    }
}

fn then_stage<T, U, F>(f: F) -> impl FnOnce(Result<T, Error>, Promise<U>) + Send
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(T) -> Future<U> + Send + 'static,
{
    move |input, promise| match input.and_then(|value| catch(move || f(value))) {
        Ok(inner) => inner.forward(promise),
        Err(error) => promise.fail(error),
    }
}

fn recover_stage<T, U, F>(f: F) -> impl FnOnce(Result<T, Error>, Promise<U>) + Send
where
    T: Send + 'static,
    U: Send + 'static,
    F: FnOnce(Result<T, Error>) -> U + Send + 'static,
{
    move |input, promise| match catch(move || f(input)) {
        Ok(output) => promise.set(output),
        Err(error) => promise.fail(error),
    }
}
