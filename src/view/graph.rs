use serde::{Deserialize, Serialize};

use crate::model::flow::StepType;

/// Name of the single logical output port every non-final node exposes.
pub const OUTPUT_PORT: &str = "output_1";
/// Name of the single logical input port every non-initial node exposes.
pub const INPUT_PORT: &str = "input_1";

/// Step attributes that ride along in the editor's node payload so they
/// survive the round-trip through the widget.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_initial: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_final: Option<bool>,
}

/// One visual element of the graph.
///
/// `node_id` is transient: during domain-to-view conversion it is the step's
/// list index; once nodes live in the editor it is the editor-assigned id.
/// `step_id` is the permanent backend id, `None` while unpersisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub node_id: i64,
    pub step_id: Option<i64>,
    pub name: String,
    pub step_type: StepType,
    pub description: String,
    pub pos_x: i32,
    pub pos_y: i32,
    pub class_name: String,
    pub inputs: u32,
    pub outputs: u32,
    pub html: String,
    pub metadata: NodeMetadata,
}

/// A directed edge between two transient node ids.
///
/// Only meaningful for persistence when both endpoint nodes carry a
/// permanent step id; the reconciler drops it otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConnection {
    pub source_node_id: i64,
    pub target_node_id: i64,
    pub output_port: String,
    pub input_port: String,
}

/// Transient whole-graph state for one flow. Rebuilt on every load, edit
/// session and save cycle, never persisted as such.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewGraph {
    pub flow_id: i64,
    pub nodes: Vec<ViewNode>,
    pub connections: Vec<ViewConnection>,
}
