//! Converts between successor/predecessor id lists on steps and explicit
//! connections between view nodes.

use std::collections::HashMap;

use crate::model::flow::DqFlowStep;
use crate::view::graph::{INPUT_PORT, OUTPUT_PORT, ViewConnection, ViewNode};

/// Derives view connections from the successor lists of an ordered step set.
///
/// Node ids in the result are step list indices (the placeholder convention
/// of domain-to-view conversion). Successor ids that do not resolve to a
/// sibling step are skipped; the flow may legitimately be mid-edit.
pub fn derive_connections(steps: &[DqFlowStep]) -> Vec<ViewConnection> {
    // id -> index lookup, built once up front
    let index_by_id: HashMap<i64, usize> = steps
        .iter()
        .enumerate()
        .filter_map(|(index, step)| step.id.map(|id| (id, index)))
        .collect();

    let mut connections = Vec::new();

    for (source_index, step) in steps.iter().enumerate() {
        for successor_id in &step.successor_ids {
            match index_by_id.get(successor_id) {
                Some(&target_index) => connections.push(ViewConnection {
                    source_node_id: source_index as i64,
                    target_node_id: target_index as i64,
                    output_port: OUTPUT_PORT.to_string(),
                    input_port: INPUT_PORT.to_string(),
                }),
                None => log::warn!(
                    "Successor id {} of step '{}' not found among flow steps; skipping connection",
                    successor_id,
                    step.name
                ),
            }
        }
    }

    connections
}

/// Rebuilds successor/predecessor lists on `steps` from a connection set.
///
/// `steps` must be parallel to `nodes` (step i was produced from node i).
/// Every list is cleared first; the conversion replaces relationships, it
/// never adds to them. A connection contributes only when both endpoint
/// steps carry a permanent id, and each logical edge is recorded at most
/// once no matter how often it appears in the input.
pub fn rebuild_relationships(
    nodes: &[ViewNode],
    connections: &[ViewConnection],
    steps: &mut [DqFlowStep],
) {
    for step in steps.iter_mut() {
        step.successor_ids.clear();
        step.predecessor_ids.clear();
    }

    let index_by_node_id: HashMap<i64, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.node_id, index))
        .collect();

    for connection in connections {
        let (Some(&source_index), Some(&target_index)) = (
            index_by_node_id.get(&connection.source_node_id),
            index_by_node_id.get(&connection.target_node_id),
        ) else {
            log::warn!(
                "Connection {} -> {} references a node that is not part of the graph; skipping",
                connection.source_node_id,
                connection.target_node_id
            );
            continue;
        };

        // Both endpoints need permanent ids before the edge can be expressed.
        let (Some(source_id), Some(target_id)) = (steps[source_index].id, steps[target_index].id)
        else {
            log::debug!(
                "Dropping connection {} -> {}: endpoint step not persisted yet",
                connection.source_node_id,
                connection.target_node_id
            );
            continue;
        };

        if !steps[source_index].successor_ids.contains(&target_id) {
            steps[source_index].successor_ids.push(target_id);
        }
        if !steps[target_index].predecessor_ids.contains(&source_id) {
            steps[target_index].predecessor_ids.push(source_id);
        }
    }
}
