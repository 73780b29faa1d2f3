use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states of a flow: CREATED -> VALIDATED -> PRODUCTION -> ARCHIVED.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowStatus {
    Created,
    Validated,
    Production,
    Archived,
}

/// The kind of work a step performs. The wire names carry a space.
///
/// Unrecognized wire names map to `Unknown` instead of failing
/// deserialization; payloads coming back from the graph editor are not
/// guaranteed to carry a known type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    DataSource,
    DqRule,
    Transformation,
    Decision,
    DataSink,
    Unknown,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::DataSource => "DATA SOURCE",
            StepType::DqRule => "DQ RULE",
            StepType::Transformation => "TRANSFORMATION",
            StepType::Decision => "DECISION",
            StepType::DataSink => "DATA SINK",
            StepType::Unknown => "UNKNOWN",
        }
    }

    /// Maps a wire name to its variant; anything unrecognized is `Unknown`.
    pub fn from_wire(name: &str) -> StepType {
        match name {
            "DATA SOURCE" => StepType::DataSource,
            "DQ RULE" => StepType::DqRule,
            "TRANSFORMATION" => StepType::Transformation,
            "DECISION" => StepType::Decision,
            "DATA SINK" => StepType::DataSink,
            _ => StepType::Unknown,
        }
    }

    /// Style class applied to the node rendered for this step type.
    pub fn css_class(&self) -> &'static str {
        match self {
            StepType::DataSource => "node-data-source",
            StepType::DqRule => "node-dq-rule",
            StepType::Transformation => "node-transformation",
            StepType::Decision => "node-decision",
            StepType::DataSink => "node-data-sink",
            StepType::Unknown => "node-default",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for StepType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StepType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(StepType::from_wire(&name))
    }
}

/// One stage of a data-quality flow, as persisted by the backend.
///
/// `id` is absent for steps that have not completed a backend round-trip yet.
/// `successor_ids`/`predecessor_ids` reference permanent ids of sibling steps
/// of the same flow.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DqFlowStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub step_type: StepType,

    // Manual overrides for initial/final step designation. When absent the
    // crate treats both as false (see PortDefaults).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_initial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,

    #[serde(default)]
    pub successor_ids: Vec<i64>,
    #[serde(default)]
    pub predecessor_ids: Vec<i64>,

    // Graph layout positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_y: Option<i32>,

    // Type-specific foreign references: integration for DATA SOURCE and
    // DATA SINK, rule for DQ RULE, transformation for TRANSFORMATION.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_id: Option<i64>,
}

/// A named, ordered pipeline of steps owned by the backend.
///
/// The front side only ever holds a transient working copy; after every
/// successful save the backend's response replaces it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DqFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<DqFlowStep>,
    pub status: FlowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<DateTime<Utc>>,
}

impl DqFlow {
    /// True when any step still lacks a permanent id.
    pub fn has_unpersisted_steps(&self) -> bool {
        self.steps.iter().any(|step| step.id.is_none())
    }
}
