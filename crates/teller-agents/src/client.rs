use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tokio::time::sleep;

use crate::{
    Agent, AgentDefinition, AgentsError, ListOrder, MessageRole, Run, Thread, ThreadMessage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Enumerates supported `AgentsAuthScheme` values.
pub enum AgentsAuthScheme {
    #[default]
    Bearer,
    ApiKeyHeader,
}

#[derive(Debug, Clone)]
/// Public struct `AgentsConfig` used across Teller components.
pub struct AgentsConfig {
    pub endpoint: String,
    pub credential: String,
    pub auth_scheme: AgentsAuthScheme,
    pub api_version: String,
    pub request_timeout_ms: u64,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone)]
/// Public struct `AgentsClient` used across Teller components.
pub struct AgentsClient {
    client: reqwest::Client,
    config: AgentsConfig,
}

impl AgentsClient {
    pub fn new(config: AgentsConfig) -> Result<Self, AgentsError> {
        if config.credential.trim().is_empty() {
            return Err(AgentsError::MissingCredential);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match config.auth_scheme {
            AgentsAuthScheme::Bearer => {
                let bearer = format!("Bearer {}", config.credential.trim());
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&bearer).map_err(|e| {
                        AgentsError::InvalidResponse(format!("invalid credential header: {e}"))
                    })?,
                );
            }
            AgentsAuthScheme::ApiKeyHeader => {
                headers.insert(
                    "api-key",
                    HeaderValue::from_str(config.credential.trim()).map_err(|e| {
                        AgentsError::InvalidResponse(format!("invalid credential header: {e}"))
                    })?,
                );
            }
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.endpoint.trim_end_matches('/');
        format!("{base}/{path}")
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, AgentsError> {
        let response = request
            .query(&[("api-version", self.config.api_version.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AgentsError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    pub async fn create_agent(&self, definition: &AgentDefinition) -> Result<Agent, AgentsError> {
        definition.validate()?;
        let raw = self
            .execute(self.client.post(self.url("assistants")).json(definition))
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn delete_agent(&self, agent_id: &str) -> Result<(), AgentsError> {
        let raw = self
            .execute(self.client.delete(self.url(&format!("assistants/{agent_id}"))))
            .await?;
        let deletion: AgentDeletion = serde_json::from_str(&raw)?;
        if !deletion.deleted {
            return Err(AgentsError::InvalidResponse(format!(
                "service did not confirm deletion of agent {agent_id}"
            )));
        }
        Ok(())
    }

    pub async fn create_thread(&self) -> Result<Thread, AgentsError> {
        let raw = self
            .execute(self.client.post(self.url("threads")).json(&json!({})))
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<ThreadMessage, AgentsError> {
        let body = json!({
            "role": role.as_str(),
            "content": text,
        });
        let raw = self
            .execute(
                self.client
                    .post(self.url(&format!("threads/{thread_id}/messages")))
                    .json(&body),
            )
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn list_messages(
        &self,
        thread_id: &str,
        order: ListOrder,
        limit: Option<usize>,
    ) -> Result<Vec<ThreadMessage>, AgentsError> {
        let mut request = self
            .client
            .get(self.url(&format!("threads/{thread_id}/messages")))
            .query(&[("order", order.query_value())]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }
        let raw = self.execute(request).await?;
        let listing: MessageListing = serde_json::from_str(&raw)?;
        Ok(listing.data)
    }

    pub async fn create_run(&self, thread_id: &str, agent_id: &str) -> Result<Run, AgentsError> {
        let body = json!({ "assistant_id": agent_id });
        let raw = self
            .execute(
                self.client
                    .post(self.url(&format!("threads/{thread_id}/runs")))
                    .json(&body),
            )
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run, AgentsError> {
        let raw = self
            .execute(
                self.client
                    .get(self.url(&format!("threads/{thread_id}/runs/{run_id}"))),
            )
            .await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Creates a run and blocks until the service reports a terminal status.
    /// Reasoning and tool delegation happen remotely; this only polls.
    pub async fn create_and_process(
        &self,
        thread_id: &str,
        agent_id: &str,
    ) -> Result<Run, AgentsError> {
        let mut run = self.create_run(thread_id, agent_id).await?;
        while !run.status.is_terminal() {
            sleep(std::time::Duration::from_millis(
                self.config.poll_interval_ms.max(1),
            ))
            .await;
            run = self.get_run(thread_id, &run.id).await?;
        }
        Ok(run)
    }
}

#[derive(Debug, Deserialize)]
struct AgentDeletion {
    deleted: bool,
}

#[derive(Debug, Deserialize)]
struct MessageListing {
    data: Vec<ThreadMessage>,
}
