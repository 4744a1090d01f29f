//! Task lifecycle hooks for service identity tokens
//!
//! This crate implements the prestart hook that hands an already-issued
//! service identity (SI) token to a mesh-enabled task:
//!
//! - **Data model**: allocations, task groups, services and tasks, and the
//!   derivation of a service's identity name and target cluster
//! - **Hook resources**: the shared, read-only pool of issued tokens
//! - **Lifecycle**: the capability used to kill a task that cannot proceed
//! - **Hooks**: the prestart hook protocol, a prestart runner, and the SI
//!   token hook itself
//!
//! # Architecture
//!
//! ```text
//!        task runner
//!             |
//!       PrestartRunner
//!             |
//!          SidsHook ---- TokenSource (AllocHookResources)
//!             |     \
//!             |      `-- TaskLifecycle
//!        taskhook-fs
//! ```

pub mod error;
pub mod hooks;
pub mod lifecycle;
pub mod logging;
pub mod resources;
pub mod structs;

pub use error::{Error, Result};
pub use hooks::{
    PrestartOutcome, PrestartRunner, RecoveredToken, SI_TOKEN_FILE, SI_TOKEN_FILE_MODE,
    SIDS_HOOK_NAME, SidsHook, SidsHookConfig, TaskHook, TaskPrestartHook, TaskPrestartRequest,
    TaskPrestartResponse,
};
pub use lifecycle::TaskLifecycle;
pub use resources::{AllocHookResources, ConsulToken, ConsulTokens, TokenSource};
pub use structs::{
    Allocation, ConsulConfig, Job, Service, ServiceIdentity, ServiceProvider, Task, TaskEvent,
    TaskEventType, TaskGroup, TaskKind,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_write_token_displays_cause() {
        let source = taskhook_fs::Error::io(
            "/alloc/web/secrets/si_token",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        let error = Error::WriteToken { source };

        let display = error.to_string();
        assert!(
            display.contains("failed to write SI token"),
            "Error display should name the operation, got: {}",
            display
        );
        assert!(
            display.contains("/alloc/web/secrets/si_token"),
            "Error display should contain the path, got: {}",
            display
        );
    }

    #[test]
    fn error_lifecycle_display_is_lowercase() {
        let error = Error::Lifecycle {
            message: "task runner is shutting down".into(),
        };
        assert_eq!(
            error.to_string(),
            "lifecycle error: task runner is shutting down"
        );
    }
}
