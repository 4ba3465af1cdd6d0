/// Error type for a whole execution run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The requested definition does not exist. A defined failure: the job
    /// ends FAILURE, never a silent no-result success.
    #[error("Workflow not found: {id}")]
    WorkflowNotFound { id: String },

    /// Loading the definition or persisting the result failed.
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// A step handler failed; execution stops at that step.
    #[error("Step {index} ({action}) failed: {source}")]
    Step {
        index: usize,
        action: &'static str,
        #[source]
        source: StepError,
    },
}

/// Error type for a single action handler.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// The step params are missing a required field or have the wrong shape.
    #[error("Missing or invalid params: {0}")]
    InvalidParams(String),

    /// The outbound HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("HTTP request returned status {0}")]
    HttpStatus(u16),

    /// The text-generation call failed.
    #[error("Text generation failed: {0}")]
    TextGen(String),

    /// A storage operation inside a step failed.
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),
}
