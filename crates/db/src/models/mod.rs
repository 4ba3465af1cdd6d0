//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the `Deserialize` DTOs used at the request edge.

pub mod job;
pub mod workflow;
pub mod workflow_result;
