//! [`TestTask`] for hook scenarios that touch the task's directories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use taskhook_core::{
    Allocation, SI_TOKEN_FILE, SidsHook, SidsHookConfig, Task, TaskLifecycle, TaskPrestartRequest,
    TokenSource,
};
use taskhook_fs::TaskDir;
use tempfile::TempDir;

/// A task with a fully built task directory inside a temporary allocation
/// directory.
///
/// # Example
///
/// ```rust,no_run
/// use taskhook_core::{Task, TaskKind};
/// use taskhook_test_utils::task::TestTask;
///
/// let task = TestTask::new(Task::new("proxy", TaskKind::connect_proxy("web")));
/// assert!(task.task_dir().secrets_dir.is_dir());
/// ```
pub struct TestTask {
    alloc_dir: TempDir,
    task: Task,
    task_dir: TaskDir,
}

impl TestTask {
    /// Create the allocation directory and build the task's layout in it.
    ///
    /// # Panics
    /// Panics if the directories cannot be created.
    pub fn new(task: Task) -> Self {
        let alloc_dir = TempDir::new()
            .unwrap_or_else(|e| panic!("TestTask::new: failed to create alloc dir: {e}"));
        let task_dir = TaskDir::new(alloc_dir.path(), &task.name);
        task_dir
            .build()
            .unwrap_or_else(|e| panic!("TestTask::new: failed to build task dir: {e}"));
        Self {
            alloc_dir,
            task,
            task_dir,
        }
    }

    pub fn alloc_dir(&self) -> &Path {
        self.alloc_dir.path()
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn task_dir(&self) -> &TaskDir {
        &self.task_dir
    }

    /// Path the SI token hook writes the token to.
    pub fn token_path(&self) -> PathBuf {
        self.task_dir.secrets_dir.join(SI_TOKEN_FILE)
    }

    /// Prestart request for this task.
    pub fn prestart_request(&self) -> TaskPrestartRequest {
        TaskPrestartRequest {
            task: self.task.clone(),
            task_dir: self.task_dir.clone(),
        }
    }

    /// A fresh SI token hook for this task, as a new task runner would
    /// create it.
    pub fn sids_hook(
        &self,
        alloc: Arc<Allocation>,
        lifecycle: Arc<dyn TaskLifecycle>,
        token_source: Arc<dyn TokenSource>,
    ) -> SidsHook {
        SidsHook::new(SidsHookConfig {
            alloc,
            task: self.task.clone(),
            lifecycle,
            token_source,
        })
    }

    /// Contents of the token file, if one was written.
    pub fn read_token(&self) -> Option<String> {
        std::fs::read_to_string(self.token_path()).ok()
    }
}
