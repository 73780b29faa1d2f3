//! The editing session around one flow: working copy, editor contents,
//! change tracking and the save protocol.

mod save;

pub use save::SaveOutcome;


use bimap::BiMap;
use std::sync::Arc;

use crate::client::FlowApi;
use crate::editor::{EditorEvent, EditorNodeId, GraphEditor, NodeConfig};
use crate::error::{Error, Result};
use crate::graph::assembler;
use crate::model::execution::FlowExecution;
use crate::model::flow::{DqFlow, DqFlowStep};
use crate::model::validate::ValidationReport;
use crate::view::export::NodePayload;

/// One editing session over a persisted flow.
///
/// Owns the transient working copy and keeps the editor contents derived
/// from it. All mutation happens through this type, which serializes edits
/// the way the surrounding modal dialog does; there is no concurrent access
/// to the working copy.
pub struct FlowEditSession<E: GraphEditor> {
    flow: DqFlow,
    editor: E,
    api: Arc<dyn FlowApi>,
    /// step list index <-> editor node id, rebuilt on every load
    node_ids: BiMap<usize, EditorNodeId>,
    selected_node: Option<EditorNodeId>,
    has_unsaved_changes: bool,
    loading: bool,
    saving: bool,
}

impl<E: GraphEditor> FlowEditSession<E> {
    /// Opens a session and loads the flow into the editor. Fails for flows
    /// without a permanent id; those cannot carry a graph yet.
    pub fn open(flow: DqFlow, editor: E, api: Arc<dyn FlowApi>) -> Result<Self> {
        let mut session = FlowEditSession {
            flow,
            editor,
            api,
            node_ids: BiMap::new(),
            selected_node: None,
            has_unsaved_changes: false,
            loading: false,
            saving: false,
        };
        session.load()?;
        Ok(session)
    }

    pub fn flow(&self) -> &DqFlow {
        &self.flow
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn selected_node(&self) -> Option<EditorNodeId> {
        self.selected_node
    }

    /// Direct access to the editor, for wiring up user interaction.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// Rebuilds the editor contents from the working flow.
    ///
    /// Editor notifications raised while loading are not user edits; they
    /// are discarded instead of marking the session dirty.
    pub fn load(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.load_into_editor();
        self.editor.take_events();
        self.loading = false;
        result
    }

    fn load_into_editor(&mut self) -> Result<()> {
        let graph = assembler::domain_to_view(&self.flow)?;

        self.editor.clear();
        self.selected_node = None;
        self.node_ids = BiMap::new();

        for (index, node) in graph.nodes.iter().enumerate() {
            let editor_id = self.editor.add_node(NodeConfig {
                name: node.name.clone(),
                inputs: node.inputs,
                outputs: node.outputs,
                pos_x: node.pos_x,
                pos_y: node.pos_y,
                class_name: node.class_name.clone(),
                payload: NodePayload {
                    step_id: node.step_id,
                    step_index: Some(index),
                    step_type: Some(node.step_type),
                    description: Some(node.description.clone()),
                    metadata: Some(node.metadata.clone()),
                },
                html: node.html.clone(),
            });
            self.node_ids.insert(index, editor_id);
        }

        // Derived connections address nodes by list index; translate to the
        // ids the editor just assigned.
        for connection in &graph.connections {
            let source = self
                .node_ids
                .get_by_left(&(connection.source_node_id as usize))
                .copied();
            let target = self
                .node_ids
                .get_by_left(&(connection.target_node_id as usize))
                .copied();

            match (source, target) {
                (Some(source), Some(target)) => {
                    if !self.editor.add_connection(
                        source,
                        target,
                        &connection.output_port,
                        &connection.input_port,
                    ) {
                        log::warn!("Editor rejected connection {} -> {}", source, target);
                    }
                }
                _ => log::warn!(
                    "Could not map connection {} -> {} onto editor nodes",
                    connection.source_node_id,
                    connection.target_node_id
                ),
            }
        }

        log::debug!(
            "Loaded flow '{}' into editor: {} nodes, {} connections",
            self.flow.name,
            graph.nodes.len(),
            graph.connections.len()
        );

        Ok(())
    }

    /// Applies queued editor notifications to the session state. Call after
    /// user interactions with the widget.
    pub fn pump_events(&mut self) {
        for event in self.editor.take_events() {
            match event {
                EditorEvent::NodeSelected(node) => self.selected_node = Some(node),
                EditorEvent::NodeUnselected => self.selected_node = None,
                EditorEvent::ConnectionCreated | EditorEvent::ConnectionRemoved => {
                    if !self.loading {
                        self.has_unsaved_changes = true;
                    }
                }
            }
        }
    }

    /// Appends a step to the working flow and reloads the graph.
    pub fn add_step(&mut self, step: DqFlowStep) -> Result<()> {
        self.flow.steps.push(step);
        self.has_unsaved_changes = true;
        self.load()
    }

    /// Replaces the step at `index` and reloads the graph.
    pub fn update_step(&mut self, index: usize, step: DqFlowStep) -> Result<()> {
        if index >= self.flow.steps.len() {
            log::warn!("update_step: no step at index {}", index);
            return Ok(());
        }
        self.flow.steps[index] = step;
        self.has_unsaved_changes = true;
        self.load()
    }

    /// Removes the currently selected step, if any, and reloads the graph.
    pub fn remove_selected_step(&mut self) -> Result<()> {
        let Some(editor_id) = self.selected_node else {
            return Ok(());
        };
        let Some(&index) = self.node_ids.get_by_right(&editor_id) else {
            log::warn!("Selected editor node {} maps to no step", editor_id);
            return Ok(());
        };

        self.flow.steps.remove(index);
        self.selected_node = None;
        self.has_unsaved_changes = true;
        self.load()
    }

    /// Clears explicit positions so the next load falls back to the grid
    /// placement.
    pub fn auto_layout(&mut self) -> Result<()> {
        for step in &mut self.flow.steps {
            step.pos_x = None;
            step.pos_y = None;
        }
        self.load()
    }

    /// Validates the last persisted version of the flow.
    ///
    /// Blocked while unsaved edits exist: the backend only sees the
    /// persisted state and the result would describe stale data.
    pub async fn validate(&self) -> Result<ValidationReport> {
        let flow_id = self.flow.id.ok_or(Error::MissingFlowId)?;
        if self.has_unsaved_changes {
            return Err(Error::UnsavedChanges);
        }
        self.api.validate_flow(flow_id).await
    }

    /// Triggers a remote execution of the persisted flow.
    pub async fn execute(&self) -> Result<FlowExecution> {
        let flow_id = self.flow.id.ok_or(Error::MissingFlowId)?;
        self.api.execute_flow(flow_id).await
    }
}
