/// An erased unit of work submitted to an executor.
///
/// Running consumes the task, so "at most once" is structural. Dropping a
/// task without running it is observable: any future waiting on it resolves
/// to [`Error::Abandoned`](crate::Error::Abandoned).
pub struct Task(Box<dyn FnOnce() + Send>);

impl Task {
    pub(crate) fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Task(Box::new(f))
    }

    pub fn run(self) {
        (self.0)()
    }
}
