//! Broker wire types and well-known exchange names.
//!
//! Cross-process messages travel over fanout exchanges. Broadcast events are
//! wrapped in the [`EventEnvelope`] (`{"data": ...}`) wire envelope; the job
//! hand-off message is the bare [`ExecuteWorkflowJob`] payload on the durable
//! work queue.
//!
//! Delivery guarantee for the broadcast exchanges: at-most-once to each queue
//! bound at publish time. A listener binds an exclusive, auto-delete queue,
//! so events published while no listener is up are dropped by the broker.
//! This path is observational and intentionally lossy.

use serde::{Deserialize, Serialize};

/// Fanout exchange announcing newly created workflow definitions.
pub const CREATE_WORKFLOW_EXCHANGE: &str = "create_workflow";

/// Fanout exchange announcing job starts (`{workflow_id, job_id}`).
pub const TRIGGER_WORKFLOW_EXCHANGE: &str = "trigger_workflow";

/// Durable exchange carrying execution requests to the worker pool.
pub const EXECUTE_WORKFLOW_EXCHANGE: &str = "execute_workflow";

/// Durable queue the workers bind to [`EXECUTE_WORKFLOW_EXCHANGE`].
pub const EXECUTE_WORKFLOW_QUEUE: &str = "execute_workflow";

/// Wire envelope for broadcast events: `{"data": <payload>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub data: serde_json::Value,
}

impl EventEnvelope {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }
}

/// Execution request handed from the API to a worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteWorkflowJob {
    pub workflow_id: String,
    pub job_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_under_data_key() {
        let envelope = EventEnvelope::new(serde_json::json!({"id": "abc", "tenant_id": "t1"}));
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["data"]["id"], "abc");
        assert_eq!(wire["data"]["tenant_id"], "t1");
    }

    #[test]
    fn job_message_round_trips() {
        let msg = ExecuteWorkflowJob {
            workflow_id: "wf-1".into(),
            job_id: "job-1".into(),
        };
        let bytes = serde_json::to_vec(&msg).unwrap();
        let back: ExecuteWorkflowJob = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.workflow_id, "wf-1");
        assert_eq!(back.job_id, "job-1");
    }
}
