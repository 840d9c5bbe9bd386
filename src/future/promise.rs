use super::state::Shared;
use crate::error::Error;

use std::sync::Arc;

/// Write side of a shared state. Owned by the producing task; setting a
/// result consumes it. A promise dropped without being consumed resolves
/// the state to `Error::Abandoned`, which is how a task discarded by its
/// executor becomes visible.
pub(crate) struct Promise<T> {
    state: Option<Arc<Shared<T>>>,
}

impl<T> Promise<T> {
    pub(crate) fn new(state: Arc<Shared<T>>) -> Self {
        Promise { state: Some(state) }
    }

    pub(crate) fn set(self, value: T) {
        self.complete_with(Ok(value));
    }

    pub(crate) fn fail(self, error: Error) {
        self.complete_with(Err(error));
    }

    pub(crate) fn complete_with(mut self, result: Result<T, Error>) {
        if let Some(state) = self.state.take() {
            state.complete(result);
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            state.complete(Err(Error::Abandoned));
        }
    }
}
