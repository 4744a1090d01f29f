use serde::{Deserialize, Serialize};

use super::{Service, ServiceIdentity, Task};

/// Group-level Consul settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsulConfig {
    #[serde(default)]
    pub cluster: String,
}

/// A group of tasks scheduled together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    pub name: String,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub consul: Option<ConsulConfig>,
}

/// A job definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub task_groups: Vec<TaskGroup>,
}

impl Job {
    /// Find a task group by name.
    pub fn lookup_task_group(&self, name: &str) -> Option<&TaskGroup> {
        self.task_groups.iter().find(|tg| tg.name == name)
    }
}

/// A placement of one task group of a job on a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: String,
    /// Name of the task group this allocation runs
    pub task_group: String,
    pub job: Job,
}

impl Allocation {
    /// The task group this allocation runs, if the job defines it.
    pub fn group(&self) -> Option<&TaskGroup> {
        self.job.lookup_task_group(&self.task_group)
    }

    /// Resolve the identity key of the group-level service `task` implements.
    ///
    /// The service is the first one in the allocation's group whose name
    /// equals the task kind's value. Returns `None` if the group or a
    /// matching service does not exist.
    pub fn service_identity(&self, task: &Task) -> Option<ServiceIdentity> {
        let group = self.group()?;
        let service_name = task.kind.value();
        group
            .services
            .iter()
            .find(|service| service.name == service_name)
            .map(|service| ServiceIdentity {
                cluster: service.consul_cluster_name(group),
                identity_name: service.unique_identity_name(),
            })
    }
}
