//! Job entity and lifecycle states.

use flowline_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Lifecycle labels for a job, stored as TEXT in the `state` column.
///
/// `Pending → Started → Success | Failure`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Started,
    Success,
    Failure,
}

impl JobState {
    /// The stored label for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "PENDING",
            JobState::Started => "STARTED",
            JobState::Success => "SUCCESS",
            JobState::Failure => "FAILURE",
        }
    }

    /// Parse a stored label back into a state.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "PENDING" => Some(JobState::Pending),
            "STARTED" => Some(JobState::Started),
            "SUCCESS" => Some(JobState::Success),
            "FAILURE" => Some(JobState::Failure),
            _ => None,
        }
    }

    /// Whether this state ends the job's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: String,
    pub workflow_id: String,
    pub state: String,
    pub result: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl Job {
    /// The typed state, falling back to `Pending` for an unrecognised label.
    pub fn job_state(&self) -> JobState {
        JobState::parse(&self.state).unwrap_or(JobState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for state in [
            JobState::Pending,
            JobState::Started,
            JobState::Success,
            JobState::Failure,
        ] {
            assert_eq!(JobState::parse(state.as_str()), Some(state));
        }
        assert_eq!(JobState::parse("RETRYING"), None);
    }

    #[test]
    fn only_success_and_failure_are_terminal() {
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Started.is_terminal());
        assert!(JobState::Success.is_terminal());
        assert!(JobState::Failure.is_terminal());
    }
}
