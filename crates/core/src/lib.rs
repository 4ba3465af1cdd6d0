//! Shared domain types for the Flowline workflow platform.
//!
//! This crate sits at the bottom of the workspace dependency graph and has
//! no internal dependencies. It defines:
//!
//! - [`workflow`] -- workflow steps and the closed action set.
//! - [`events`] -- wire types and exchange names for broker messages.
//! - [`error`] -- the [`CoreError`](error::CoreError) domain error type.

pub mod error;
pub mod events;
pub mod types;
pub mod workflow;

pub use error::CoreError;
pub use workflow::{StepAction, WorkflowStep};
