use serde::{Deserialize, Serialize};

use crate::model::flow::{DqFlow, StepType};

/// Outcome of validating a flow, either locally or via the backend endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Validates a working flow without a backend round-trip.
///
/// Applies the same rules the backend enforces on its validate endpoint:
/// required type-specific references, connectivity of non-initial/non-final
/// steps, and the presence of at least one initial and one final step.
/// Absent `is_initial`/`is_final` flags count as `false`.
pub fn validate_flow(flow: &DqFlow) -> ValidationReport {
    let mut errors: Vec<String> = Vec::new();

    if flow.steps.is_empty() {
        errors.push("Flow must have at least one step".to_string());
        return ValidationReport { valid: false, errors };
    }

    let mut initial_count = 0;
    let mut final_count = 0;

    for step in &flow.steps {
        let is_initial = step.is_initial.unwrap_or(false);
        let is_final = step.is_final.unwrap_or(false);

        if is_initial {
            initial_count += 1;
        }
        if is_final {
            final_count += 1;
        }

        // A step may only be both initial and final in a single-step flow.
        if is_initial && is_final && flow.steps.len() > 1 {
            errors.push(format!(
                "Step \"{}\" cannot be both initial and final when there are multiple steps",
                step.name
            ));
        }

        let has_inputs = !step.predecessor_ids.is_empty();
        let has_outputs = !step.successor_ids.is_empty();

        if !is_initial && !has_inputs {
            errors.push(format!(
                "Step \"{}\" is not marked as initial but has no input connections",
                step.name
            ));
        }

        if !is_final && !has_outputs {
            errors.push(format!(
                "Step \"{}\" is not marked as final but has no output connections",
                step.name
            ));
        }

        match step.step_type {
            StepType::DataSource | StepType::DataSink => {
                if step.integration_id.is_none() {
                    errors.push(format!(
                        "Step \"{}\" is a Data Source or Data Sink but has no integration selected",
                        step.name
                    ));
                }
            }
            StepType::DqRule => {
                if step.rule_id.is_none() {
                    errors.push(format!(
                        "Step \"{}\" is a DQ Rule but has no rule selected",
                        step.name
                    ));
                }
            }
            _ => {}
        }
    }

    if initial_count == 0 {
        errors.push("Flow must have at least one initial step (no inputs)".to_string());
    }

    if final_count == 0 {
        errors.push("Flow must have at least one final step (no outputs)".to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
