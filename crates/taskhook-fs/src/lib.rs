//! Filesystem layer for task hooks
//!
//! Provides the per-task directory layout and the small set of I/O
//! primitives hooks use to stage secrets for a workload.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;

pub use config::ConfigStore;
pub use constants::TaskDirEntry;
pub use error::{Error, Result};
pub use layout::TaskDir;
