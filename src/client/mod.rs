//! Async seams towards the REST backend.

pub mod memory;
pub mod rest;

#[cfg(test)]
mod client_tests;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::execution::FlowExecution;
use crate::model::flow::DqFlow;
use crate::model::validate::ValidationReport;

/// The flow endpoints of the backend.
///
/// The response of [`update_flow`](FlowApi::update_flow) is authoritative:
/// it carries the permanent ids the backend assigned and must replace the
/// caller's working copy.
#[async_trait]
pub trait FlowApi: Send + Sync {
    async fn list_flows(&self) -> Result<Vec<DqFlow>>;

    /// Fetches one flow, as done when an editing dialog opens.
    async fn get_flow(&self, id: i64) -> Result<DqFlow>;

    async fn create_flow(&self, flow: &DqFlow) -> Result<DqFlow>;

    async fn update_flow(&self, id: i64, flow: &DqFlow) -> Result<DqFlow>;

    async fn delete_flow(&self, id: i64) -> Result<()>;

    /// Validates the last persisted version of the flow, not any unsaved
    /// working copy.
    async fn validate_flow(&self, id: i64) -> Result<ValidationReport>;

    async fn execute_flow(&self, id: i64) -> Result<FlowExecution>;
}

/// The integration endpoints needed by the flow editor.
#[async_trait]
pub trait IntegrationApi: Send + Sync {
    /// Fetches column metadata for an integration. The backend signals
    /// domain-level failures in-band: a first row prefixed `Error:` is
    /// surfaced as [`Error::IntegrationMetadataError`], distinct from a
    /// transport failure.
    ///
    /// [`Error::IntegrationMetadataError`]: crate::error::Error::IntegrationMetadataError
    async fn metadata(&self, id: i64) -> Result<Vec<String>>;
}
