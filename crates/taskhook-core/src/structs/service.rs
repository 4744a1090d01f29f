use serde::{Deserialize, Serialize};

use super::TaskGroup;

/// Prefix of the identity name of a Consul-registered service.
pub const CONSUL_SERVICE_IDENTITY_PREFIX: &str = "consul-service";

/// Prefix of the identity name of a Nomad-registered service.
pub const NOMAD_SERVICE_IDENTITY_PREFIX: &str = "nomad-service";

/// Cluster used when neither the service nor its group names one.
pub const CONSUL_DEFAULT_CLUSTER: &str = "default";

/// Which catalog a service is registered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProvider {
    #[default]
    Consul,
    Nomad,
}

/// A group-level service definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub port_label: String,
    #[serde(default)]
    pub provider: ServiceProvider,
    /// Consul cluster the service registers in, overriding the group's
    #[serde(default)]
    pub cluster: Option<String>,
}

impl Service {
    pub fn new(name: impl Into<String>, port_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port_label: port_label.into(),
            ..Self::default()
        }
    }

    /// Set the Consul cluster for this service.
    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    pub fn with_provider(mut self, provider: ServiceProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn is_nomad(&self) -> bool {
        self.provider == ServiceProvider::Nomad
    }

    /// Name of the workload identity issued for this service.
    ///
    /// Unique within a task group: `<prefix>_<name>-<port_label>`.
    pub fn unique_identity_name(&self) -> String {
        let prefix = if self.is_nomad() {
            NOMAD_SERVICE_IDENTITY_PREFIX
        } else {
            CONSUL_SERVICE_IDENTITY_PREFIX
        };
        format!("{}_{}-{}", prefix, self.name, self.port_label)
    }

    /// Consul cluster this service's tokens are issued by.
    ///
    /// The service's own cluster wins, then the group's, then
    /// [`CONSUL_DEFAULT_CLUSTER`].
    pub fn consul_cluster_name(&self, group: &TaskGroup) -> String {
        if let Some(cluster) = self.cluster.as_deref().filter(|c| !c.is_empty()) {
            return cluster.to_string();
        }
        if let Some(cluster) = group
            .consul
            .as_ref()
            .map(|consul| consul.cluster.as_str())
            .filter(|c| !c.is_empty())
        {
            return cluster.to_string();
        }
        CONSUL_DEFAULT_CLUSTER.to_string()
    }
}

/// The key an SI token is stored under in the hook resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceIdentity {
    pub cluster: String,
    pub identity_name: String,
}

impl ServiceIdentity {
    /// Both halves of the key are present.
    pub fn is_complete(&self) -> bool {
        !self.cluster.is_empty() && !self.identity_name.is_empty()
    }
}
