//! Error types for taskhook-core

/// Result type for taskhook-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in taskhook-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Persisting the SI token into the secrets directory failed
    #[error("failed to write SI token: {source}")]
    WriteToken {
        #[source]
        source: taskhook_fs::Error,
    },

    /// Reading a previously persisted SI token failed for a reason other
    /// than the file not existing
    #[error("failed to recover SI token: {source}")]
    RecoverToken {
        #[source]
        source: taskhook_fs::Error,
    },

    /// The lifecycle controller rejected a request
    #[error("lifecycle error: {message}")]
    Lifecycle { message: String },

    /// A prestart hook failed
    #[error("prestart hook {hook:?} failed: {source}")]
    HookFailed {
        hook: String,
        #[source]
        source: Box<Error>,
    },
}
