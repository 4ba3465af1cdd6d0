//! Flowline background worker.
//!
//! Two consumer roles share one broker connection:
//!
//! - [`JobRunner`](runner::JobRunner) -- competes on the durable
//!   `execute_workflow` queue and drives the execution engine.
//! - [`CreateWorkflowListener`](listener::CreateWorkflowListener) -- an
//!   ephemeral fanout subscriber that logs workflow-creation events.

pub mod config;
pub mod listener;
pub mod runner;
