//! Route definitions, one module per resource.

pub mod health;
pub mod jobs;
pub mod workflow_results;
pub mod workflows;
