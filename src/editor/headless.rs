//! In-memory editor used for tests and headless embeddings.
//!
//! Reproduces the widget's observable behavior: node ids start at 1 and
//! increment, `clear` resets the counter, ports are named `input_n` /
//! `output_n`, and every connection is recorded on the source's output port
//! and mirrored on the target's input port.

use std::collections::{BTreeMap, VecDeque};

use crate::editor::{EditorEvent, EditorNodeId, GraphEditor, NodeConfig};
use crate::view::export::{
    EditorExport, EditorModule, EditorModules, EditorNodeRecord, InputConnection, InputPort,
    OutputConnection, OutputPort,
};

#[derive(Debug)]
pub struct HeadlessEditor {
    next_node_id: i64,
    nodes: BTreeMap<EditorNodeId, EditorNodeRecord>,
    events: VecDeque<EditorEvent>,
    selected: Option<EditorNodeId>,
}

impl Default for HeadlessEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEditor {
    pub fn new() -> Self {
        HeadlessEditor {
            next_node_id: 1,
            nodes: BTreeMap::new(),
            events: VecDeque::new(),
            selected: None,
        }
    }

    /// Simulates the user clicking a node.
    pub fn select_node(&mut self, node: EditorNodeId) {
        if self.nodes.contains_key(&node) {
            self.selected = Some(node);
            self.events.push_back(EditorEvent::NodeSelected(node));
        }
    }

    /// Simulates the user clicking empty canvas.
    pub fn unselect(&mut self) {
        self.selected = None;
        self.events.push_back(EditorEvent::NodeUnselected);
    }

    /// Simulates the user deleting a connection. Returns false when no such
    /// connection exists.
    pub fn remove_connection(
        &mut self,
        source: EditorNodeId,
        target: EditorNodeId,
        output_port: &str,
        input_port: &str,
    ) -> bool {
        let target_key = target.to_string();
        let source_key = source.to_string();

        let mut removed = false;
        if let Some(port) = self
            .nodes
            .get_mut(&source)
            .and_then(|record| record.outputs.get_mut(output_port))
        {
            let before = port.connections.len();
            port.connections
                .retain(|entry| !(entry.node == target_key && entry.output == input_port));
            removed = port.connections.len() < before;
        }

        if removed {
            if let Some(port) = self
                .nodes
                .get_mut(&target)
                .and_then(|record| record.inputs.get_mut(input_port))
            {
                port.connections
                    .retain(|entry| !(entry.node == source_key && entry.input == output_port));
            }
            self.events.push_back(EditorEvent::ConnectionRemoved);
        }

        removed
    }

    /// Read access to a live node record, mainly for assertions.
    pub fn node(&self, node: EditorNodeId) -> Option<&EditorNodeRecord> {
        self.nodes.get(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl GraphEditor for HeadlessEditor {
    fn add_node(&mut self, config: NodeConfig) -> EditorNodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;

        let inputs: BTreeMap<String, InputPort> = (1..=config.inputs)
            .map(|n| (format!("input_{}", n), InputPort::default()))
            .collect();
        let outputs: BTreeMap<String, OutputPort> = (1..=config.outputs)
            .map(|n| (format!("output_{}", n), OutputPort::default()))
            .collect();

        let record = EditorNodeRecord {
            id,
            name: config.name,
            data: config.payload,
            class: config.class_name,
            html: config.html,
            typenode: false,
            inputs,
            outputs,
            pos_x: config.pos_x,
            pos_y: config.pos_y,
        };

        self.nodes.insert(id, record);
        id
    }

    fn add_connection(
        &mut self,
        source: EditorNodeId,
        target: EditorNodeId,
        output_port: &str,
        input_port: &str,
    ) -> bool {
        // Both endpoints and both ports must exist before anything mutates.
        let source_ok = self
            .nodes
            .get(&source)
            .is_some_and(|record| record.outputs.contains_key(output_port));
        let target_ok = self
            .nodes
            .get(&target)
            .is_some_and(|record| record.inputs.contains_key(input_port));
        if !source_ok || !target_ok {
            return false;
        }

        let target_key = target.to_string();
        let source_key = source.to_string();

        if let Some(port) = self
            .nodes
            .get_mut(&source)
            .and_then(|record| record.outputs.get_mut(output_port))
        {
            if port
                .connections
                .iter()
                .any(|entry| entry.node == target_key && entry.output == input_port)
            {
                return false;
            }
            port.connections.push(OutputConnection {
                node: target_key,
                output: input_port.to_string(),
            });
        }

        if let Some(port) = self
            .nodes
            .get_mut(&target)
            .and_then(|record| record.inputs.get_mut(input_port))
        {
            port.connections.push(InputConnection {
                node: source_key,
                input: output_port.to_string(),
            });
        }

        self.events.push_back(EditorEvent::ConnectionCreated);
        true
    }

    fn export(&self) -> EditorExport {
        EditorExport {
            drawflow: EditorModules {
                home: EditorModule {
                    data: self
                        .nodes
                        .iter()
                        .map(|(id, record)| (id.to_string(), record.clone()))
                        .collect(),
                },
            },
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.selected = None;
        self.next_node_id = 1;
    }

    fn set_step_id(&mut self, node: EditorNodeId, step_id: i64) {
        if let Some(record) = self.nodes.get_mut(&node) {
            record.data.step_id = Some(step_id);
        }
    }

    fn take_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }
}
