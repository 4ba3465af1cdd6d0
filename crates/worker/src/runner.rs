//! Job consumption and state transitions.

use std::sync::Arc;

use flowline_broker::consumer::CallbackError;
use flowline_broker::{ChannelProvider, Consumer, ConsumerConfig};
use flowline_core::events::{
    ExecuteWorkflowJob, EXECUTE_WORKFLOW_EXCHANGE, EXECUTE_WORKFLOW_QUEUE,
};
use flowline_db::repositories::JobRepo;
use flowline_db::DbPool;
use flowline_engine::Engine;

/// Consumes execution requests from the durable work queue and drives the
/// engine, recording each job's state transitions.
///
/// An execution failure is a completed message: the failure is recorded on
/// the job row (its terminal FAILURE payload) and the delivery is acked.
/// Only infrastructure errors -- a malformed payload or an unreachable job
/// store -- reject the delivery.
pub struct JobRunner {
    pool: DbPool,
    engine: Arc<Engine>,
}

impl JobRunner {
    pub fn new(pool: DbPool, engine: Arc<Engine>) -> Self {
        Self { pool, engine }
    }

    /// Bind the durable queue and start consuming.
    ///
    /// Prefetch is 1: each worker holds at most one unacknowledged
    /// execution at a time, so the broker spreads jobs across the pool.
    pub async fn start(
        self: Arc<Self>,
        provider: Arc<dyn ChannelProvider>,
    ) -> Result<String, flowline_broker::BrokerError> {
        let config = ConsumerConfig::fanout(EXECUTE_WORKFLOW_EXCHANGE)
            .with_queue(EXECUTE_WORKFLOW_QUEUE)
            .with_prefetch(1);
        let consumer = Consumer::new(provider, config);

        let runner = Arc::clone(&self);
        consumer
            .start(move |payload| {
                let runner = Arc::clone(&runner);
                async move { runner.handle_message(payload).await }
            })
            .await
    }

    /// Process one execution request end to end.
    async fn handle_message(&self, payload: Vec<u8>) -> Result<(), CallbackError> {
        let job: ExecuteWorkflowJob = serde_json::from_slice(&payload)?;
        tracing::info!(
            job_id = %job.job_id,
            workflow_id = %job.workflow_id,
            "Execution request received",
        );

        JobRepo::mark_started(&self.pool, &job.job_id).await?;

        match self.engine.execute(&job.workflow_id).await {
            Ok(report) => {
                let result = serde_json::to_value(&report)?;
                JobRepo::complete(&self.pool, &job.job_id, &result).await?;
                tracing::info!(
                    job_id = %job.job_id,
                    workflow_id = %job.workflow_id,
                    steps = report.steps.len(),
                    "Workflow execution succeeded",
                );
            }
            Err(e) => {
                tracing::error!(
                    job_id = %job.job_id,
                    workflow_id = %job.workflow_id,
                    error = %e,
                    "Workflow execution failed",
                );
                JobRepo::fail(&self.pool, &job.job_id, &e.to_string()).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flowline_core::events::ExecuteWorkflowJob;

    #[test]
    fn execution_request_decodes_from_wire_payload() {
        let payload = br#"{"workflow_id": "wf-1", "job_id": "job-1"}"#;
        let job: ExecuteWorkflowJob = serde_json::from_slice(payload).unwrap();
        assert_eq!(job.workflow_id, "wf-1");
        assert_eq!(job.job_id, "job-1");
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let payload = br#"{"workflow": "missing ids"}"#;
        assert!(serde_json::from_slice::<ExecuteWorkflowJob>(payload).is_err());
    }
}
