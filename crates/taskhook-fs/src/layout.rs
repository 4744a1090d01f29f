//! Per-task directory layout
//!
//! Every task in an allocation gets its own directory under the allocation
//! directory, next to the `alloc` directory shared by all tasks:
//!
//! ```text
//! <alloc_dir>/
//!   alloc/
//!   <task>/
//!     local/
//!     secrets/
//!     private/
//!     tmp/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result, TaskDirEntry};

/// Mode for the secrets directory: owner only.
#[cfg(unix)]
const SECRETS_DIR_MODE: u32 = 0o700;

/// Paths of one task's directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDir {
    /// Root of the task's directory
    pub dir: PathBuf,
    /// Directory shared by all tasks in the allocation
    pub shared_alloc_dir: PathBuf,
    pub local_dir: PathBuf,
    /// Directory where runtime secrets are staged for the workload
    pub secrets_dir: PathBuf,
    pub private_dir: PathBuf,
    pub tmp_dir: PathBuf,
}

impl TaskDir {
    /// Compute the layout for `task_name` inside `alloc_dir`.
    ///
    /// Nothing is created on disk; see [`TaskDir::build`].
    pub fn new(alloc_dir: impl AsRef<Path>, task_name: &str) -> Self {
        let alloc_dir = alloc_dir.as_ref();
        let dir = alloc_dir.join(task_name);
        Self {
            shared_alloc_dir: alloc_dir.join(TaskDirEntry::SharedAlloc),
            local_dir: dir.join(TaskDirEntry::Local),
            secrets_dir: dir.join(TaskDirEntry::Secrets),
            private_dir: dir.join(TaskDirEntry::Private),
            tmp_dir: dir.join(TaskDirEntry::Tmp),
            dir,
        }
    }

    /// Create every directory of the layout.
    pub fn build(&self) -> Result<()> {
        for dir in [
            &self.shared_alloc_dir,
            &self.local_dir,
            &self.secrets_dir,
            &self.private_dir,
            &self.tmp_dir,
        ] {
            fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(
                &self.secrets_dir,
                fs::Permissions::from_mode(SECRETS_DIR_MODE),
            )
            .map_err(|e| Error::io(&self.secrets_dir, e))?;
        }

        tracing::debug!(dir = %self.dir.display(), "Built task directory");
        Ok(())
    }
}
