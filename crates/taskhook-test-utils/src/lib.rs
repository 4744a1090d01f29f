//! Shared test utilities for the taskhook workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`alloc`]: allocation and token pool builders
//! - [`doubles`]: recording and counting stand-ins for the hook's collaborators
//! - [`task`]: [`task::TestTask`] for a task with a real directory on disk

pub mod alloc;
pub mod doubles;
pub mod task;
