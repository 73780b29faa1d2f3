//! The save protocol.
//!
//! Connections are only expressible between permanent step ids, but new
//! steps receive their id from the backend on first save. A single combined
//! submit would therefore silently drop every edge touching a new step.
//! When both conditions meet (new steps present and connections present)
//! the save runs in two sequential phases: phase 1 persists the steps to
//! obtain ids, phase 2 re-extracts the now id-complete graph and persists
//! the connections.

use std::collections::HashMap;

use crate::client::FlowApi as _;
use crate::editor::GraphEditor;
use crate::error::{Error, Result, SavePhase};
use crate::graph::assembler;
use crate::model::flow::DqFlow;
use crate::session::FlowEditSession;

/// How a completed save was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// One submission was enough.
    SinglePhase,
    /// Steps and connections were persisted in two sequential submissions.
    TwoPhase,
}

impl<E: GraphEditor> FlowEditSession<E> {
    /// Persists the current editor state for this flow.
    ///
    /// Re-entry is rejected with [`Error::SaveInProgress`]; a second save
    /// must wait for the first outcome. On failure the working copy stays
    /// at its last pre-phase snapshot (which after a phase 2 failure is the
    /// phase 1 result: steps persisted, connections not).
    pub async fn save(&mut self) -> Result<SaveOutcome> {
        if self.saving {
            return Err(Error::SaveInProgress);
        }
        self.saving = true;
        let outcome = self.save_editor_state().await;
        self.saving = false;
        outcome
    }

    async fn save_editor_state(&mut self) -> Result<SaveOutcome> {
        let flow_id = self.flow.id.ok_or(Error::MissingFlowId)?;

        // The current editor state is authoritative, not the graph the
        // session loaded last; the user may have rewired connections since.
        let export = self.editor.export();
        let graph = assembler::from_editor_export(&export, flow_id);
        let candidate = assembler::view_to_domain(&graph, &self.flow);

        let has_new_steps = candidate.has_unpersisted_steps();
        let has_connections = !graph.connections.is_empty();

        if !(has_new_steps && has_connections) {
            let saved = self
                .submit(flow_id, &candidate, SavePhase::Single)
                .await?;
            self.finish_save(saved)?;
            return Ok(SaveOutcome::SinglePhase);
        }

        log::info!(
            "Flow '{}' has unpersisted steps and connections; saving in two phases",
            candidate.name
        );

        // Phase 1: persist steps to obtain permanent ids. Edges touching
        // new steps were dropped by the conversion above and reappear in
        // phase 2.
        let saved = self
            .submit(flow_id, &candidate, SavePhase::StepPersistence)
            .await?;
        self.flow = saved;

        // Ids correlate by list position: saved step i is submitted step i.
        let assigned: HashMap<usize, i64> = self
            .flow
            .steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| step.id.map(|id| (index, id)))
            .collect();
        log::debug!("Step ids recovered after phase 1: {:?}", assigned);
        self.push_step_ids(&assigned);

        // Phase 2: the re-exported graph now carries real ids everywhere,
        // so the connections survive the conversion.
        let export = self.editor.export();
        let graph = assembler::from_editor_export(&export, flow_id);
        let final_flow = assembler::view_to_domain(&graph, &self.flow);

        let saved = self
            .submit(flow_id, &final_flow, SavePhase::ConnectionPersistence)
            .await?;
        self.finish_save(saved)?;
        Ok(SaveOutcome::TwoPhase)
    }

    async fn submit(&self, flow_id: i64, flow: &DqFlow, phase: SavePhase) -> Result<DqFlow> {
        self.api
            .update_flow(flow_id, flow)
            .await
            .map_err(|source| Error::SaveFailed {
                phase,
                source: Box::new(source),
            })
    }

    fn finish_save(&mut self, saved: DqFlow) -> Result<()> {
        self.flow = saved;
        self.has_unsaved_changes = false;
        self.load()
    }

    /// Pushes backend-assigned ids into the live editor nodes so the next
    /// export carries them. Nodes are matched to steps through the step
    /// index recorded in their payload.
    fn push_step_ids(&mut self, assigned: &HashMap<usize, i64>) {
        let export = self.editor.export();
        for (key, record) in &export.drawflow.home.data {
            let Ok(node_id) = key.parse::<i64>() else {
                continue;
            };
            let Some(step_index) = record.data.step_index else {
                continue;
            };
            if let Some(&step_id) = assigned.get(&step_index) {
                self.editor.set_step_id(node_id, step_id);
            }
        }
    }
}
