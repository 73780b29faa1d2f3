use async_trait::async_trait;
use reqwest::Response;

use crate::client::{FlowApi, IntegrationApi};
use crate::error::{Error, Result};
use crate::model::execution::FlowExecution;
use crate::model::flow::DqFlow;
use crate::model::validate::ValidationReport;

/// reqwest-backed client for the backend's JSON API.
///
/// No client-side timeout or retry: a failed call surfaces its error and
/// leaves the caller's state untouched.
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// `base_url` is the API root, e.g. `http://localhost:8081/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        RestClient {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        log::error!("Backend request failed with status {}: {}", status, message);
        Err(Error::BackendError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl FlowApi for RestClient {
    async fn list_flows(&self) -> Result<Vec<DqFlow>> {
        let response = self.client.get(self.url("/flows")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_flow(&self, id: i64) -> Result<DqFlow> {
        let response = self
            .client
            .get(self.url(&format!("/flows/{}", id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_flow(&self, flow: &DqFlow) -> Result<DqFlow> {
        let response = self
            .client
            .post(self.url("/flows"))
            .json(flow)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_flow(&self, id: i64, flow: &DqFlow) -> Result<DqFlow> {
        let response = self
            .client
            .put(self.url(&format!("/flows/{}", id)))
            .json(flow)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_flow(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/flows/{}", id)))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn validate_flow(&self, id: i64) -> Result<ValidationReport> {
        let response = self
            .client
            .get(self.url(&format!("/flows/{}/validate", id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn execute_flow(&self, id: i64) -> Result<FlowExecution> {
        let response = self
            .client
            .post(self.url(&format!("/flows/{}/execute", id)))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl IntegrationApi for RestClient {
    async fn metadata(&self, id: i64) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.url(&format!("/integrations/metadata/{}", id)))
            .send()
            .await?;
        let rows: Vec<String> = Self::check(response).await?.json().await?;

        if let Some(message) = rows.first().and_then(|row| row.strip_prefix("Error:")) {
            return Err(Error::IntegrationMetadataError(message.trim().to_string()));
        }

        Ok(rows)
    }
}
