//! Allocation, job and task data model
//!
//! Only the parts of the model the task hooks consume are represented here:
//! enough to find the group-level service a task implements and derive the
//! key its SI token is stored under.

mod allocation;
mod event;
mod service;
mod task;

pub use allocation::{Allocation, ConsulConfig, Job, TaskGroup};
pub use event::{TaskEvent, TaskEventType};
pub use service::{
    CONSUL_DEFAULT_CLUSTER, CONSUL_SERVICE_IDENTITY_PREFIX, NOMAD_SERVICE_IDENTITY_PREFIX, Service,
    ServiceIdentity, ServiceProvider,
};
pub use task::{Task, TaskKind};
