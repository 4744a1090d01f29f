//! Allocation and token pool builders.

use taskhook_core::{
    Allocation, ConsulConfig, ConsulToken, ConsulTokens, Job, Service, TaskGroup,
};

/// Name of the task group used by [`connect_alloc`].
pub const GROUP_NAME: &str = "api";

/// An allocation running [`GROUP_NAME`] with the given group services.
pub fn connect_alloc(services: Vec<Service>) -> Allocation {
    connect_alloc_in_cluster(services, None)
}

/// Like [`connect_alloc`], with the group pinned to a Consul cluster.
pub fn connect_alloc_in_cluster(services: Vec<Service>, cluster: Option<&str>) -> Allocation {
    Allocation {
        id: "8a3c4a4e-6a48-4b43-b4c6-58b1b9c5c1a2".to_string(),
        task_group: GROUP_NAME.to_string(),
        job: Job {
            id: "countdash".to_string(),
            task_groups: vec![TaskGroup {
                name: GROUP_NAME.to_string(),
                services,
                consul: cluster.map(|cluster| ConsulConfig {
                    cluster: cluster.to_string(),
                }),
            }],
        },
    }
}

/// Builder for a [`ConsulTokens`] pool.
#[derive(Debug, Default)]
pub struct TokensBuilder {
    tokens: ConsulTokens,
}

impl TokensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token with secret `secret_id` for `identity_name` in `cluster`.
    pub fn token(mut self, cluster: &str, identity_name: &str, secret_id: &str) -> Self {
        self.tokens
            .entry(cluster.to_string())
            .or_default()
            .insert(
                identity_name.to_string(),
                ConsulToken::new(format!("accessor-{secret_id}"), secret_id),
            );
        self
    }

    pub fn build(self) -> ConsulTokens {
        self.tokens
    }
}
