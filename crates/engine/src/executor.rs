//! The execution engine itself.

use std::time::Duration;

use flowline_core::types::new_record_id;
use flowline_core::workflow::{StepAction, WorkflowStep};
use flowline_db::repositories::{WorkflowRepo, WorkflowResultRepo};
use flowline_db::DbPool;
use serde::Serialize;
use serde_json::Value;

use crate::actions;
use crate::error::{EngineError, StepError};
use crate::textgen::{TextGenConfig, TextGenerator};

/// Timeout for a single `http_request` step call.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal report for one execution.
///
/// A superset of the historical `{ok, workflow_id}` summary: `steps` carries
/// the per-step output records in execution order, the same sequence that is
/// persisted as the run's workflow result.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub ok: bool,
    pub workflow_id: String,
    pub steps: Vec<Value>,
}

/// Executes stored workflow definitions against the fixed action registry.
pub struct Engine {
    pool: DbPool,
    http: reqwest::Client,
    textgen: TextGenerator,
}

impl Engine {
    pub fn new(pool: DbPool, textgen_config: TextGenConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to build engine HTTP client");
        Self {
            pool,
            http,
            textgen: TextGenerator::new(textgen_config),
        }
    }

    /// Execute a workflow's steps strictly in declared order.
    ///
    /// Loads the definition, runs each step through the registry, appends
    /// each output to the result sequence, persists one `workflow_result`
    /// row, and returns the report. An empty step list is a valid run that
    /// produces an empty result sequence.
    pub async fn execute(&self, workflow_id: &str) -> Result<ExecutionReport, EngineError> {
        let workflow = WorkflowRepo::find_by_id(&self.pool, workflow_id)
            .await?
            .ok_or_else(|| EngineError::WorkflowNotFound {
                id: workflow_id.to_string(),
            })?;

        let steps = &workflow.workflow.0;
        let mut records: Vec<Value> = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            tracing::info!(
                workflow_id,
                step = index,
                action = %step.action,
                "Executing workflow step"
            );

            let output = self
                .run_step(workflow_id, step)
                .await
                .map_err(|source| EngineError::Step {
                    index,
                    action: step.action.as_str(),
                    source,
                })?;

            records.push(serde_json::json!({
                "action": step.action.as_str(),
                "output": output,
            }));
        }

        WorkflowResultRepo::insert(&self.pool, &new_record_id(), workflow_id, &records).await?;

        tracing::info!(workflow_id, steps = records.len(), "Workflow execution finished");
        Ok(ExecutionReport {
            ok: true,
            workflow_id: workflow_id.to_string(),
            steps: records,
        })
    }

    /// Dispatch one step to its handler. The match is exhaustive over the
    /// closed action set; there is no dynamic registry to miss.
    async fn run_step(&self, workflow_id: &str, step: &WorkflowStep) -> Result<Value, StepError> {
        let params = step.params.as_ref();
        match step.action {
            StepAction::HttpRequest => actions::http_request(&self.http, params).await,
            StepAction::SummarizeText => {
                let text = params
                    .and_then(|p| p.get("text"))
                    .and_then(|t| t.as_str())
                    .ok_or_else(|| {
                        StepError::InvalidParams(
                            "summarize_text requires a string `text` param".into(),
                        )
                    })?;
                self.textgen.complete(text).await
            }
            StepAction::SaveToDatabase => {
                actions::save_to_database(&self.pool, workflow_id, params).await
            }
        }
    }
}
