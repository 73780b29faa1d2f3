//! In-memory stand-in for the flow backend.
//!
//! Mirrors the persistence contract the save protocol depends on: step order
//! is preserved across an update, id-less steps receive ids from a sequence,
//! and successor/predecessor ids are resolved against the saved step set
//! (unknown ids are dropped). Doubles as test infrastructure and as an
//! offline backend.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::client::{FlowApi, IntegrationApi};
use crate::error::{Error, Result};
use crate::model::execution::{FlowExecution, StepResult};
use crate::model::flow::DqFlow;
use crate::model::validate::{ValidationReport, validate_flow};

#[derive(Debug, Default)]
struct MemoryState {
    flows: std::collections::HashMap<i64, DqFlow>,
    metadata: std::collections::HashMap<i64, Vec<String>>,
    next_flow_id: i64,
    next_step_id: i64,
    update_log: Vec<DqFlow>,
    fail_updates_from: Option<usize>,
}

#[derive(Debug)]
pub struct InMemoryFlowApi {
    state: Mutex<MemoryState>,
}

impl Default for InMemoryFlowApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFlowApi {
    pub fn new() -> Self {
        InMemoryFlowApi {
            state: Mutex::new(MemoryState {
                next_flow_id: 1,
                next_step_id: 1,
                ..MemoryState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Stores a flow directly, assigning flow and step ids. Returns the
    /// stored copy.
    pub fn seed(&self, mut flow: DqFlow) -> DqFlow {
        let mut state = self.state();

        let id = flow.id.unwrap_or_else(|| {
            let id = state.next_flow_id;
            state.next_flow_id += 1;
            id
        });
        flow.id = Some(id);
        state.next_flow_id = state.next_flow_id.max(id + 1);

        for step in &mut flow.steps {
            match step.id {
                Some(step_id) => state.next_step_id = state.next_step_id.max(step_id + 1),
                None => {
                    step.id = Some(state.next_step_id);
                    state.next_step_id += 1;
                }
            }
        }

        if flow.created_date.is_none() {
            flow.created_date = Some(Utc::now());
        }

        state.flows.insert(id, flow.clone());
        flow
    }

    /// Registers metadata rows served for an integration id.
    pub fn seed_metadata(&self, id: i64, rows: Vec<String>) {
        self.state().metadata.insert(id, rows);
    }

    /// Makes every update call starting at zero-based index `from` fail
    /// with a backend error.
    pub fn fail_updates_from(&self, from: usize) {
        self.state().fail_updates_from = Some(from);
    }

    /// Removes a previously injected failure window.
    pub fn clear_update_failures(&self) {
        self.state().fail_updates_from = None;
    }

    /// Bodies submitted to `update_flow`, in call order (failed calls
    /// included).
    pub fn updates(&self) -> Vec<DqFlow> {
        self.state().update_log.clone()
    }

    /// The currently stored version of a flow.
    pub fn stored_flow(&self, id: i64) -> Option<DqFlow> {
        self.state().flows.get(&id).cloned()
    }
}

#[async_trait]
impl FlowApi for InMemoryFlowApi {
    async fn list_flows(&self) -> Result<Vec<DqFlow>> {
        let state = self.state();
        let mut flows: Vec<DqFlow> = state.flows.values().cloned().collect();
        flows.sort_by_key(|flow| flow.id);
        Ok(flows)
    }

    async fn get_flow(&self, id: i64) -> Result<DqFlow> {
        self.stored_flow(id).ok_or_else(|| Error::BackendError {
            status: 404,
            message: format!("flow {} not found", id),
        })
    }

    async fn create_flow(&self, flow: &DqFlow) -> Result<DqFlow> {
        let mut flow = flow.clone();
        flow.id = None;
        flow.modified_date = Some(Utc::now());
        Ok(self.seed(flow))
    }

    async fn update_flow(&self, id: i64, flow: &DqFlow) -> Result<DqFlow> {
        let mut state = self.state();

        let call_index = state.update_log.len();
        state.update_log.push(flow.clone());

        if state.fail_updates_from.is_some_and(|from| call_index >= from) {
            return Err(Error::BackendError {
                status: 500,
                message: "update rejected".to_string(),
            });
        }

        let Some(existing) = state.flows.get(&id).cloned() else {
            return Err(Error::BackendError {
                status: 404,
                message: format!("flow {} not found", id),
            });
        };

        let mut saved = flow.clone();
        saved.id = Some(id);
        saved.created_date = existing.created_date;
        saved.modified_date = Some(Utc::now());

        // First pass: assign ids to new steps, keeping list order.
        for step in &mut saved.steps {
            if step.id.is_none() {
                step.id = Some(state.next_step_id);
                state.next_step_id += 1;
            }
        }

        // Second pass: relationships may only reference saved siblings.
        let known: HashSet<i64> = saved.steps.iter().filter_map(|step| step.id).collect();
        for step in &mut saved.steps {
            step.successor_ids.retain(|successor| known.contains(successor));
            step.predecessor_ids.retain(|predecessor| known.contains(predecessor));
        }

        state.flows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_flow(&self, id: i64) -> Result<()> {
        let mut state = self.state();
        if state.flows.remove(&id).is_none() {
            return Err(Error::BackendError {
                status: 404,
                message: format!("flow {} not found", id),
            });
        }
        Ok(())
    }

    async fn validate_flow(&self, id: i64) -> Result<ValidationReport> {
        let state = self.state();
        let Some(flow) = state.flows.get(&id) else {
            return Err(Error::BackendError {
                status: 404,
                message: format!("flow {} not found", id),
            });
        };
        Ok(validate_flow(flow))
    }

    async fn execute_flow(&self, id: i64) -> Result<FlowExecution> {
        let state = self.state();
        let Some(flow) = state.flows.get(&id) else {
            return Err(Error::BackendError {
                status: 404,
                message: format!("flow {} not found", id),
            });
        };

        let steps: Vec<StepResult> = flow
            .steps
            .iter()
            .map(|step| StepResult {
                step_name: step.name.clone(),
                step_type: step.step_type.to_string(),
                status: "SUCCESS".to_string(),
                data: None,
                integration_name: None,
                rule_name: None,
            })
            .collect();

        Ok(FlowExecution {
            flow_name: flow.name.clone(),
            status: "SUCCESS".to_string(),
            start_time: Some(Utc::now().to_rfc3339()),
            end_time: Some(Utc::now().to_rfc3339()),
            total_steps: steps.len() as u32,
            steps,
        })
    }
}

#[async_trait]
impl IntegrationApi for InMemoryFlowApi {
    async fn metadata(&self, id: i64) -> Result<Vec<String>> {
        let state = self.state();
        let Some(rows) = state.metadata.get(&id) else {
            return Err(Error::BackendError {
                status: 404,
                message: format!("integration {} not found", id),
            });
        };

        if let Some(message) = rows.first().and_then(|row| row.strip_prefix("Error:")) {
            return Err(Error::IntegrationMetadataError(message.trim().to_string()));
        }

        Ok(rows.clone())
    }
}
