use super::handle::Future;
use super::promise::Promise;
use super::state::Shared;
use crate::error::Error;
use crate::executor::ExecutorHandle;

use std::sync::{Arc, Mutex};

struct Gather<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    promise: Option<Promise<Vec<T>>>,
}

/// Combines a group of futures into one that resolves to their values in
/// input order once every future is ready. The first failure fails the
/// combined future with the same error.
pub fn when_all<T, I>(executor: ExecutorHandle, futures: I) -> Future<Vec<T>>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let futures: Vec<_> = futures.into_iter().collect();
    let state = Arc::new(Shared::new(executor.clone()));
    let promise = Promise::new(state.clone());

    if futures.is_empty() {
        promise.set(Vec::new());
        return Future { state };
    }

    let gather = Arc::new(Mutex::new(Gather {
        slots: (0..futures.len()).map(|_| None).collect(),
        remaining: futures.len(),
        promise: Some(promise),
    }));

    for (index, future) in futures.into_iter().enumerate() {
        let gather = gather.clone();

        future.observe_on(executor.clone(), move |result| {
            let mut gather = gather.lock().unwrap();

            match result {
                Ok(value) => {
                    gather.slots[index] = Some(value);
                    gather.remaining -= 1;

                    if gather.remaining == 0 {
                        if let Some(promise) = gather.promise.take() {
                            let values = gather
                                .slots
                                .iter_mut()
                                .map(|slot| slot.take().expect("gathered value missing"))
                                .collect();
                            promise.set(values);
                        }
                    }
                }
                Err(error) => {
                    if let Some(promise) = gather.promise.take() {
                        promise.fail(error);
                    }
                }
            }
        });
    }

    Future { state }
}

struct Race<T> {
    remaining: usize,
    promise: Option<Promise<(T, usize)>>,
}

/// Resolves to the value and input index of the first future to become
/// ready. Fails only once every future has failed, with the error observed
/// last. An empty input can never produce a winner and fails with
/// `Error::Abandoned`.
pub fn when_any<T, I>(executor: ExecutorHandle, futures: I) -> Future<(T, usize)>
where
    T: Clone + Send + 'static,
    I: IntoIterator<Item = Future<T>>,
{
    let futures: Vec<_> = futures.into_iter().collect();
    let state = Arc::new(Shared::new(executor.clone()));
    let promise = Promise::new(state.clone());

    if futures.is_empty() {
        promise.fail(Error::Abandoned);
        return Future { state };
    }

    let race = Arc::new(Mutex::new(Race {
        remaining: futures.len(),
        promise: Some(promise),
    }));

    for (index, future) in futures.into_iter().enumerate() {
        let race = race.clone();

        future.observe_on(executor.clone(), move |result| {
            let mut race = race.lock().unwrap();
            race.remaining -= 1;

            match result {
                Ok(value) => {
                    if let Some(promise) = race.promise.take() {
                        promise.set((value, index));
                    }
                }
                Err(error) => {
                    if race.remaining == 0 {
                        if let Some(promise) = race.promise.take() {
                            promise.fail(error);
                        }
                    }
                }
            }
        });
    }

    Future { state }
}
