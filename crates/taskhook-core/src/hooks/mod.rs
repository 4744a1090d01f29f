//! Task lifecycle hooks
//!
//! Hooks are invoked by the task runner at fixed points in a task's life.
//! Only the prestart point is modelled here: it runs before the workload
//! process launches and may be invoked again after an agent restart or a
//! retried prestart phase.

mod runner;
mod sids;

pub use runner::{PrestartOutcome, PrestartRunner};
pub use sids::{
    RecoveredToken, SI_TOKEN_FILE, SI_TOKEN_FILE_MODE, SIDS_HOOK_NAME, SidsHook, SidsHookConfig,
};

use taskhook_fs::TaskDir;

use crate::Result;
use crate::structs::Task;

/// A hook attached to a task runner.
pub trait TaskHook: Send + Sync {
    /// Fixed identifier used in logs and for ordering.
    fn name(&self) -> &str;
}

/// Input to a prestart hook.
#[derive(Debug, Clone)]
pub struct TaskPrestartRequest {
    /// The task being started
    pub task: Task,
    /// Directories of the task being started
    pub task_dir: TaskDir,
}

/// Output of a prestart hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPrestartResponse {
    /// The hook has nothing further to do for this task
    pub done: bool,
}

/// A hook run before the task's workload process starts.
pub trait TaskPrestartHook: TaskHook {
    /// Run the hook.
    ///
    /// An error is fatal to the task's startup.
    fn prestart(
        &self,
        req: &TaskPrestartRequest,
        resp: &mut TaskPrestartResponse,
    ) -> Result<()>;
}
