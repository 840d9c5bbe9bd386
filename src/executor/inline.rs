use crate::executor::{ExecutorHandle, Task};

use std::sync::{Arc, OnceLock};

/// Handle to the inline executor, which runs each task immediately on the
/// submitting thread.
pub fn inline() -> ExecutorHandle {
    static HANDLE: OnceLock<ExecutorHandle> = OnceLock::new();

    HANDLE
        .get_or_init(|| Arc::new(|task: Task| task.run()))
        .clone()
}
