//! Service identity (SI) token hook
//!
//! Hands the SI token of a Connect task to the workload. Tokens are derived
//! upstream, per Consul cluster and service identity, and parked in the
//! allocation's hook resources. On first prestart this hook finds the token
//! for the service the task implements and writes it into the task's secrets
//! directory, where the workload reads it at startup.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use taskhook_fs::io;
use tracing::Span;

use super::{TaskHook, TaskPrestartHook, TaskPrestartRequest, TaskPrestartResponse};
use crate::error::{Error, Result};
use crate::lifecycle::TaskLifecycle;
use crate::resources::TokenSource;
use crate::structs::{Allocation, ServiceIdentity, Task, TaskEvent, TaskEventType};

/// Name of the hook, used in logs.
pub const SIDS_HOOK_NAME: &str = "consul_si_token";

/// Name of the file holding the SI token inside the task's secrets directory.
pub const SI_TOKEN_FILE: &str = "si_token";

/// Permissions of the token file: owner and group read only.
pub const SI_TOKEN_FILE_MODE: u32 = 0o440;

/// Everything a [`SidsHook`] needs at construction.
pub struct SidsHookConfig {
    pub alloc: Arc<Allocation>,
    pub task: Task,
    /// Used to kill the task when it cannot proceed
    pub lifecycle: Arc<dyn TaskLifecycle>,
    /// Tokens issued for the allocation
    pub token_source: Arc<dyn TokenSource>,
}

/// A token read back from the secrets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveredToken {
    /// No token file exists yet, which is normal on a task's first start
    NotFound,
    /// The token file's contents, verbatim
    Found(String),
}

/// Prestart hook distributing SI tokens to Connect tasks.
pub struct SidsHook {
    alloc: Arc<Allocation>,
    task: Task,
    lifecycle: Arc<dyn TaskLifecycle>,
    token_source: Arc<dyn TokenSource>,

    /// Whether prestart has yet to run for this task during the lifespan of
    /// this task runner.
    first_run: Mutex<bool>,

    span: Span,
}

impl SidsHook {
    pub fn new(config: SidsHookConfig) -> Self {
        let span = tracing::debug_span!(
            "task_hook",
            hook = SIDS_HOOK_NAME,
            alloc_id = %config.alloc.id,
            task = %config.task.name,
        );
        Self {
            alloc: config.alloc,
            task: config.task,
            lifecycle: config.lifecycle,
            token_source: config.token_source,
            first_run: Mutex::new(true),
            span,
        }
    }

    /// Write `token` into the task's secrets directory.
    pub fn write_token(&self, secrets_dir: &Path, token: &str) -> Result<()> {
        let token_path = secrets_dir.join(SI_TOKEN_FILE);
        io::write_with_mode(&token_path, token.as_bytes(), SI_TOKEN_FILE_MODE)
            .map_err(|source| Error::WriteToken { source })
    }

    /// Read back a token written by an earlier run of this hook.
    ///
    /// A missing token file is not an error. Any other I/O failure is.
    pub fn recover_token(&self, secrets_dir: &Path) -> Result<RecoveredToken> {
        let _enter = self.span.enter();
        let token_path = secrets_dir.join(SI_TOKEN_FILE);

        match io::read_optional(&token_path) {
            Ok(Some(token)) => {
                tracing::trace!("Recovered pre-existing SI token");
                Ok(RecoveredToken::Found(token))
            }
            Ok(None) => {
                tracing::trace!("No pre-existing SI token to recover");
                Ok(RecoveredToken::NotFound)
            }
            Err(source) => {
                tracing::error!(error = %source, "Failed to recover SI token");
                Err(Error::RecoverToken { source })
            }
        }
    }

    /// Kill the task, marking it failed because of `reason`.
    ///
    /// Best effort: a failure to kill is logged and otherwise ignored.
    pub fn kill(&self, reason: &dyn std::error::Error) {
        let _enter = self.span.enter();
        let event = TaskEvent::new(TaskEventType::Killing)
            .set_fails_task()
            .set_display_message(reason.to_string());

        if let Err(e) = self.lifecycle.kill(&event) {
            tracing::error!(kill_reason = %reason, error = %e, "Failed to kill task");
        }
    }

    /// The identity key of the service this task implements, if both halves
    /// of it are known.
    fn service_identity(&self) -> Option<ServiceIdentity> {
        self.alloc
            .service_identity(&self.task)
            .filter(ServiceIdentity::is_complete)
    }
}

impl TaskHook for SidsHook {
    fn name(&self) -> &str {
        SIDS_HOOK_NAME
    }
}

impl TaskPrestartHook for SidsHook {
    fn prestart(
        &self,
        req: &TaskPrestartRequest,
        resp: &mut TaskPrestartResponse,
    ) -> Result<()> {
        let mut first_run = self.first_run.lock().unwrap_or_else(PoisonError::into_inner);
        let _enter = self.span.enter();

        // do nothing if we have already done things
        if early_exit(&mut first_run) {
            resp.done = true;
            return Ok(());
        }

        // With workload identities the token for a Connect task is already
        // stored under its cluster and service identity name.
        let Some(identity) = self.service_identity() else {
            tracing::trace!("Task does not implement a group service");
            resp.done = true;
            return Ok(());
        };

        match self
            .token_source
            .lookup(&identity.cluster, &identity.identity_name)
        {
            Some(token) => {
                self.write_token(&req.task_dir.secrets_dir, &token.secret_id)?;
                tracing::debug!(
                    cluster = %identity.cluster,
                    identity = %identity.identity_name,
                    "Wrote SI token"
                );
            }
            None => tracing::trace!(
                cluster = %identity.cluster,
                identity = %identity.identity_name,
                "No SI token issued for service"
            ),
        }

        resp.done = true;
        Ok(())
    }
}

/// Returns true if prestart has already run for this hook, marking it run
/// otherwise.
fn early_exit(first_run: &mut bool) -> bool {
    !std::mem::replace(first_run, false)
}
