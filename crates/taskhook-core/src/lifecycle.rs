//! Task lifecycle capability

use crate::Result;
use crate::structs::TaskEvent;

/// Control over the lifecycle of a running task.
///
/// Implemented by the task runner and handed to hooks that may need to stop
/// the task they are attached to.
pub trait TaskLifecycle: Send + Sync {
    /// Kill the task, recording `event` as the reason.
    fn kill(&self, event: &TaskEvent) -> Result<()>;
}
