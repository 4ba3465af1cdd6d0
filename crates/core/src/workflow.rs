//! Workflow step types.
//!
//! A workflow is an ordered list of [`WorkflowStep`]s. The action set is
//! closed: [`StepAction`] is an exhaustive enum, so an unknown action name
//! fails JSON decoding at the request edge and can never reach persistence
//! or the execution engine.

use serde::{Deserialize, Serialize};

/// The closed set of executable step actions.
///
/// Serialized as snake_case strings (`"http_request"`, `"summarize_text"`,
/// `"save_to_database"`). Deserializing any other value is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    /// GET a URL and return its JSON or text body.
    HttpRequest,
    /// Send text to the text-generation service and return its response.
    SummarizeText,
    /// Persist the step params as a workflow result record.
    SaveToDatabase,
}

impl StepAction {
    /// The wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepAction::HttpRequest => "http_request",
            StepAction::SummarizeText => "summarize_text",
            StepAction::SaveToDatabase => "save_to_database",
        }
    }
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a workflow definition.
///
/// `params` is an action-specific payload and is opaque to the core; its
/// shape is interpreted by the matching handler in the execution engine.
/// An omitted `params` stays omitted on the way back out, so a stored
/// workflow lists back exactly as it was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub action: StepAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&StepAction::HttpRequest).unwrap(),
            "\"http_request\""
        );
        assert_eq!(
            serde_json::to_string(&StepAction::SummarizeText).unwrap(),
            "\"summarize_text\""
        );
        assert_eq!(
            serde_json::to_string(&StepAction::SaveToDatabase).unwrap(),
            "\"save_to_database\""
        );
    }

    #[test]
    fn unknown_action_is_rejected_at_decode_time() {
        let result = serde_json::from_str::<WorkflowStep>(
            r#"{"action": "delete_everything", "params": {}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn step_round_trips_with_params() {
        let input = r#"{"action":"http_request","params":{"url":"https://example.com"}}"#;
        let step: WorkflowStep = serde_json::from_str(input).unwrap();
        assert_eq!(step.action, StepAction::HttpRequest);
        assert_eq!(serde_json::to_string(&step).unwrap(), input);
    }

    #[test]
    fn step_without_params_stays_without_params() {
        let step: WorkflowStep = serde_json::from_str(r#"{"action":"save_to_database"}"#).unwrap();
        assert!(step.params.is_none());
        assert_eq!(
            serde_json::to_string(&step).unwrap(),
            r#"{"action":"save_to_database"}"#
        );
    }
}
