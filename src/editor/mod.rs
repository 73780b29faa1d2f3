//! Capability surface of the interactive node-graph widget.
//!
//! The mapping core never touches the concrete widget; everything it needs
//! is expressed through [`GraphEditor`], so the widget can be substituted
//! and the whole editing pipeline tested without a rendering surface.

pub mod headless;


use crate::view::export::{EditorExport, NodePayload};

/// Node id assigned by the editor when a node is inserted. Only valid
/// within one editing session.
pub type EditorNodeId = i64;

/// Everything the editor needs to insert one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub name: String,
    pub inputs: u32,
    pub outputs: u32,
    pub pos_x: i32,
    pub pos_y: i32,
    pub class_name: String,
    pub payload: NodePayload,
    pub html: String,
}

/// Notifications raised by the widget on user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    NodeSelected(EditorNodeId),
    NodeUnselected,
    ConnectionCreated,
    ConnectionRemoved,
}

pub trait GraphEditor {
    /// Inserts a node and returns the id the editor assigned to it.
    fn add_node(&mut self, config: NodeConfig) -> EditorNodeId;

    /// Connects an output port of `source` to an input port of `target`.
    /// Returns false when the editor rejects the connection (unknown node,
    /// missing port, duplicate edge).
    fn add_connection(
        &mut self,
        source: EditorNodeId,
        target: EditorNodeId,
        output_port: &str,
        input_port: &str,
    ) -> bool;

    /// Serializes the current node/edge set in the editor's native format.
    fn export(&self) -> EditorExport;

    /// Removes every node and connection.
    fn clear(&mut self);

    /// Writes a permanent step id into the payload of a live node. Used
    /// after phase 1 of a save so the next export carries real ids.
    fn set_step_id(&mut self, node: EditorNodeId, step_id: i64);

    /// Drains the queued interaction notifications, oldest first.
    fn take_events(&mut self) -> Vec<EditorEvent>;
}
