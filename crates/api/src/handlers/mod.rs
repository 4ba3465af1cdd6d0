//! Request handlers, one module per resource.

pub mod jobs;
pub mod workflow_results;
pub mod workflows;
