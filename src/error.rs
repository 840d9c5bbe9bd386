use std::any::Any;
use std::sync::Arc;

/// Failure observed through a future.
///
/// One failure can be seen by every observer of a shared state, so the type
/// is cheap to clone and compares by content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The producing task panicked. Carries the captured panic message.
    #[error("task failed: {0}")]
    Failed(Arc<str>),

    /// The producing task was dropped before it wrote a result, e.g. its
    /// executor discarded it.
    #[error("task was dropped before it produced a result")]
    Abandoned,

    /// The value was already moved out of the shared state by a consuming
    /// reader.
    #[error("value was already taken from this future")]
    Consumed,
}

impl Error {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message: Arc<str> = if let Some(s) = payload.downcast_ref::<&str>() {
            Arc::from(*s)
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Arc::from(s.as_str())
        } else {
            Arc::from("task panicked")
        };

        Error::Failed(message)
    }
}
