//! Whole-graph conversions between the domain flow, the neutral view graph
//! and the editor's native export format.

use crate::error::{Error, Result};
use crate::graph::{mapper, reconciler};
use crate::model::flow::{DqFlow, StepType};
use crate::view::export::{EditorExport, EditorNodeRecord};
use crate::view::graph::{ViewConnection, ViewGraph, ViewNode};

/// Converts a persisted flow into a view graph.
///
/// Fails with [`Error::MissingFlowId`] for unpersisted flows; a graph cannot
/// be attached to a flow the backend has never seen. Node ids in the result
/// are step list indices, not editor ids.
pub fn domain_to_view(flow: &DqFlow) -> Result<ViewGraph> {
    let flow_id = flow.id.ok_or(Error::MissingFlowId)?;

    let nodes: Vec<ViewNode> = flow
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| mapper::step_to_node(step, index, mapper::PortDefaults::NONE))
        .collect();

    let connections = reconciler::derive_connections(&flow.steps);

    Ok(ViewGraph {
        flow_id,
        nodes,
        connections,
    })
}

/// Converts a view graph back into a domain flow.
///
/// Non-graph attributes (name, description, status, timestamps, id) are
/// carried over from `original_flow`; the step list is rebuilt from the
/// graph's nodes in order, then relationships are reconciled from its
/// connections.
pub fn view_to_domain(graph: &ViewGraph, original_flow: &DqFlow) -> DqFlow {
    let mut flow = DqFlow {
        steps: Vec::with_capacity(graph.nodes.len()),
        ..original_flow.clone()
    };

    for node in &graph.nodes {
        flow.steps.push(mapper::node_to_step(node));
    }

    reconciler::rebuild_relationships(&graph.nodes, &graph.connections, &mut flow.steps);

    flow
}

/// Parses the editor's native export into a view graph.
///
/// Node ids are the editor's own integer ids. Connections are read from the
/// output side of each node only; the editor mirrors every edge on the
/// target's input side and reading both would double-count.
pub fn from_editor_export(export: &EditorExport, flow_id: i64) -> ViewGraph {
    let mut nodes = Vec::new();
    let mut connections = Vec::new();

    // Node keys are numeric strings; iterate them in numeric order so the
    // resulting step order matches the order nodes were inserted in. The
    // positional id correlation of the save protocol depends on this.
    let mut records: Vec<(i64, &EditorNodeRecord)> = Vec::with_capacity(export.drawflow.home.data.len());
    for (key, record) in &export.drawflow.home.data {
        match key.parse::<i64>() {
            Ok(node_id) => records.push((node_id, record)),
            Err(_) => log::warn!(
                "Editor export carries non-numeric node key '{}'; skipping node",
                key
            ),
        }
    }
    records.sort_by_key(|(node_id, _)| *node_id);

    for (node_id, record) in records {
        let payload = &record.data;

        nodes.push(ViewNode {
            node_id,
            step_id: payload.step_id,
            name: record.name.clone(),
            step_type: payload.step_type.unwrap_or(StepType::Unknown),
            description: payload.description.clone().unwrap_or_default(),
            pos_x: record.pos_x,
            pos_y: record.pos_y,
            class_name: record.class.clone(),
            inputs: record.inputs.len() as u32,
            outputs: record.outputs.len() as u32,
            html: record.html.clone(),
            metadata: payload.metadata.clone().unwrap_or_default(),
        });

        for (output_port, port) in &record.outputs {
            for entry in &port.connections {
                let Ok(target_node_id) = entry.node.parse::<i64>() else {
                    log::warn!(
                        "Connection of node {} names non-numeric target '{}'; skipping",
                        node_id,
                        entry.node
                    );
                    continue;
                };

                connections.push(ViewConnection {
                    source_node_id: node_id,
                    target_node_id,
                    output_port: output_port.clone(),
                    input_port: entry.output.clone(),
                });
            }
        }
    }

    ViewGraph {
        flow_id,
        nodes,
        connections,
    }
}
