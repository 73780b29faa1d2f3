//! Pure step/node conversions. Relationship lists are never touched here;
//! the reconciler owns them.

use crate::model::flow::DqFlowStep;
use crate::view::graph::{NodeMetadata, ViewNode};

const START_X: i32 = 100;
const START_Y: i32 = 100;
const HORIZONTAL_SPACING: i32 = 300;
const VERTICAL_SPACING: i32 = 150;
const NODES_PER_ROW: usize = 3;

/// Fallback for absent `is_initial`/`is_final` flags, supplied by the caller.
///
/// The crate-wide default is `NONE` (both false), matching the persisted
/// entity; an embedder that wants position-based inference can pass its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortDefaults {
    pub is_initial: bool,
    pub is_final: bool,
}

impl PortDefaults {
    pub const NONE: PortDefaults = PortDefaults {
        is_initial: false,
        is_final: false,
    };
}

/// Row-major grid placement for steps without explicit coordinates.
pub fn auto_position(index: usize) -> (i32, i32) {
    let row = index / NODES_PER_ROW;
    let col = index % NODES_PER_ROW;

    (
        START_X + (col as i32 * HORIZONTAL_SPACING),
        START_Y + (row as i32 * VERTICAL_SPACING),
    )
}

/// Converts one step at position `index` of its flow into a view node.
///
/// Deterministic and side-effect free. The transient `node_id` is set to
/// `index` as a placeholder; the editor-assigned id supersedes it once the
/// node is actually inserted. Port counts follow the initial/final flags:
/// initial steps get no inputs, final steps no outputs, nothing ever gets
/// more than one of either.
pub fn step_to_node(step: &DqFlowStep, index: usize, defaults: PortDefaults) -> ViewNode {
    let is_initial = step.is_initial.unwrap_or(defaults.is_initial);
    let is_final = step.is_final.unwrap_or(defaults.is_final);

    let (auto_x, auto_y) = auto_position(index);

    ViewNode {
        node_id: index as i64,
        step_id: step.id,
        name: step.name.clone(),
        step_type: step.step_type,
        description: step.description.clone(),
        pos_x: step.pos_x.unwrap_or(auto_x),
        pos_y: step.pos_y.unwrap_or(auto_y),
        class_name: step.step_type.css_class().to_string(),
        inputs: if is_initial { 0 } else { 1 },
        outputs: if is_final { 0 } else { 1 },
        html: node_html(step),
        metadata: NodeMetadata {
            integration_id: step.integration_id,
            rule_id: step.rule_id,
            transformation_id: step.transformation_id,
            is_initial: step.is_initial,
            is_final: step.is_final,
        },
    }
}

/// Inverse projection of [`step_to_node`].
///
/// A node without a step id becomes a step without an id ("new step").
/// Successor/predecessor lists are always left empty; they are filled in a
/// separate pass by the reconciler.
pub fn node_to_step(node: &ViewNode) -> DqFlowStep {
    DqFlowStep {
        id: node.step_id,
        name: node.name.clone(),
        description: node.description.clone(),
        step_type: node.step_type,
        is_initial: node.metadata.is_initial,
        is_final: node.metadata.is_final,
        successor_ids: Vec::new(),
        predecessor_ids: Vec::new(),
        pos_x: Some(node.pos_x),
        pos_y: Some(node.pos_y),
        integration_id: node.metadata.integration_id,
        rule_id: node.metadata.rule_id,
        transformation_id: node.metadata.transformation_id,
    }
}

fn node_html(step: &DqFlowStep) -> String {
    format!(
        "<div class=\"node-content\"><div class=\"node-title\">{}</div><div class=\"node-type\">{}</div></div>",
        step.name, step.step_type
    )
}
