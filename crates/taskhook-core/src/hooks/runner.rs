//! Ordered execution of prestart hooks

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::{TaskPrestartHook, TaskPrestartRequest, TaskPrestartResponse};
use crate::error::{Error, Result};

/// Result of running one prestart hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrestartOutcome {
    /// The hook's name
    pub hook: String,
    /// The hook reported it has nothing further to do
    pub done: bool,
    /// The hook was not invoked because an earlier run reported done
    pub skipped: bool,
}

/// Runs a task's prestart hooks in registration order.
///
/// A hook that reports `done` is not invoked again by this runner. If a hook
/// fails, execution stops and the error is returned (fail-fast behavior).
pub struct PrestartRunner {
    hooks: Vec<Arc<dyn TaskPrestartHook>>,
    done: Mutex<HashSet<String>>,
}

impl PrestartRunner {
    pub fn new(hooks: Vec<Arc<dyn TaskPrestartHook>>) -> Self {
        Self {
            hooks,
            done: Mutex::new(HashSet::new()),
        }
    }

    /// Run every prestart hook that has not yet reported done.
    pub fn run(&self, req: &TaskPrestartRequest) -> Result<Vec<PrestartOutcome>> {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        let mut outcomes = Vec::with_capacity(self.hooks.len());

        for hook in &self.hooks {
            let name = hook.name().to_string();

            if done.contains(&name) {
                tracing::trace!(hook = %name, task = %req.task.name, "Skipping done prestart hook");
                outcomes.push(PrestartOutcome {
                    hook: name,
                    done: true,
                    skipped: true,
                });
                continue;
            }

            tracing::debug!(hook = %name, task = %req.task.name, "Running prestart hook");
            let mut resp = TaskPrestartResponse::default();
            if let Err(e) = hook.prestart(req, &mut resp) {
                tracing::error!(hook = %name, task = %req.task.name, error = %e, "Prestart hook failed");
                return Err(Error::HookFailed {
                    hook: name,
                    source: Box::new(e),
                });
            }

            if resp.done {
                done.insert(name.clone());
            }
            outcomes.push(PrestartOutcome {
                hook: name,
                done: resp.done,
                skipped: false,
            });
        }

        Ok(outcomes)
    }
}
