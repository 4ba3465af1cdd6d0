//! Workflow execution engine.
//!
//! Loads a stored workflow definition and runs its steps strictly in
//! declared order against the closed action set, accumulating one output
//! record per step into a persisted workflow result.
//!
//! The engine is read-only against the definition, so concurrent executions
//! of the same workflow id are safe; there is no per-workflow lock and
//! callers must not assume at-most-one-concurrent-execution.

pub mod actions;
pub mod error;
pub mod executor;
pub mod textgen;

pub use error::{EngineError, StepError};
pub use executor::{Engine, ExecutionReport};
pub use textgen::{TextGenConfig, TextGenerator};
