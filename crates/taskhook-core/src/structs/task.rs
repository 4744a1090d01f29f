use std::fmt;

use serde::{Deserialize, Serialize};

const CONNECT_PROXY_PREFIX: &str = "connect-proxy";
const CONNECT_NATIVE_PREFIX: &str = "connect-native";

/// The kind of a task, in the form `"<kind>:<value>"`.
///
/// For Connect tasks the value is the name of the group-level service the
/// task implements, e.g. `connect-proxy:web`. Ordinary tasks have an empty
/// kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKind(String);

impl TaskKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Kind of a sidecar proxy task fronting `service`.
    pub fn connect_proxy(service: &str) -> Self {
        Self(format!("{CONNECT_PROXY_PREFIX}:{service}"))
    }

    /// Kind of a natively integrated Connect task implementing `service`.
    pub fn connect_native(service: &str) -> Self {
        Self(format!("{CONNECT_NATIVE_PREFIX}:{service}"))
    }

    /// The part after the first `:`, or `""` if there is none.
    pub fn value(&self) -> &str {
        self.0.split_once(':').map(|(_, value)| value).unwrap_or("")
    }

    pub fn is_connect_proxy(&self) -> bool {
        self.has_prefix(CONNECT_PROXY_PREFIX)
    }

    pub fn is_connect_native(&self) -> bool {
        self.has_prefix(CONNECT_NATIVE_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.0
            .split_once(':')
            .is_some_and(|(kind, _)| kind == prefix)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A task within a task group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default)]
    pub kind: TaskKind,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}
