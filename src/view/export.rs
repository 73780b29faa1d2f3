//! The graph editor's native export format.
//!
//! The widget serializes its canvas as a keyed map of node records. Each
//! record lists its connections twice: once under the source node's output
//! port and mirrored under the target node's input port. Node ids appear as
//! strings both in the map keys and in connection entries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::flow::StepType;
use crate::view::graph::NodeMetadata;

/// Application payload attached to every editor node.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub step_type: Option<StepType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

/// A connection entry on the source side: `node` is the target node id,
/// `output` names the target's input port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OutputConnection {
    pub node: String,
    pub output: String,
}

/// The mirrored entry on the target side: `node` is the source node id,
/// `input` names the source's output port.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InputConnection {
    pub node: String,
    pub input: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPort {
    #[serde(default)]
    pub connections: Vec<OutputConnection>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPort {
    #[serde(default)]
    pub connections: Vec<InputConnection>,
}

/// One node record as the editor exports it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EditorNodeRecord {
    pub id: i64,
    pub name: String,
    pub data: NodePayload,
    pub class: String,
    pub html: String,
    pub typenode: bool,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputPort>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputPort>,
    pub pos_x: i32,
    pub pos_y: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EditorModule {
    #[serde(default)]
    pub data: BTreeMap<String, EditorNodeRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EditorModules {
    #[serde(rename = "Home")]
    pub home: EditorModule,
}

/// Root of the editor's export document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EditorExport {
    pub drawflow: EditorModules,
}
