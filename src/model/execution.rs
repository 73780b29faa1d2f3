use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Result of one executed step, as reported by the execute endpoint.
///
/// `data` is a free-form bag keyed by output name; array values are row sets
/// and get a bounded preview when formatted for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub step_name: String,
    pub step_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

/// Response of `POST /flows/{id}/execute`.
///
/// Timestamps arrive as strings and may carry a bracketed zone id suffix;
/// they are kept raw here and parsed leniently by the report formatter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowExecution {
    pub flow_name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub steps: Vec<StepResult>,
}
