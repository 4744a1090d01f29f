//! Resources shared between the hooks of one allocation
//!
//! Tokens are issued upstream (one per service identity, per Consul cluster)
//! and placed here before task prestart hooks run. Task hooks only read them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// A Consul ACL token issued for a service identity.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsulToken {
    pub accessor_id: String,
    /// The secret presented by the workload
    pub secret_id: String,
}

impl ConsulToken {
    pub fn new(accessor_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        Self {
            accessor_id: accessor_id.into(),
            secret_id: secret_id.into(),
        }
    }
}

impl fmt::Debug for ConsulToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsulToken")
            .field("accessor_id", &self.accessor_id)
            .field("secret_id", &"<redacted>")
            .finish()
    }
}

/// Tokens keyed by cluster, then by identity name.
pub type ConsulTokens = HashMap<String, HashMap<String, ConsulToken>>;

/// Read-only lookup of issued SI tokens.
pub trait TokenSource: Send + Sync {
    /// Find the token issued for `identity_name` by `cluster`.
    fn lookup(&self, cluster: &str, identity_name: &str) -> Option<ConsulToken>;
}

/// Container for resources produced by allocation-level hooks and consumed
/// by task-level hooks.
#[derive(Debug, Default)]
pub struct AllocHookResources {
    consul_tokens: RwLock<ConsulTokens>,
}

impl AllocHookResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the issued tokens.
    pub fn set_consul_tokens(&self, tokens: ConsulTokens) {
        *self
            .consul_tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner) = tokens;
    }

    /// Snapshot of the issued tokens.
    pub fn consul_tokens(&self) -> ConsulTokens {
        self.consul_tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenSource for AllocHookResources {
    fn lookup(&self, cluster: &str, identity_name: &str) -> Option<ConsulToken> {
        self.consul_tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cluster)
            .and_then(|by_identity| by_identity.get(identity_name))
            .cloned()
    }
}
