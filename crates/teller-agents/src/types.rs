use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `MessageRole` values.
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Connected-agent tool reference: lets one hosted agent invoke another as a
/// callable capability.
pub struct ConnectedAgentTool {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Enumerates supported `AgentTool` values.
pub enum AgentTool {
    ConnectedAgent { connected_agent: ConnectedAgentTool },
}

impl AgentTool {
    pub fn connected_agent(
        agent_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::ConnectedAgent {
            connected_agent: ConnectedAgentTool {
                id: agent_id.into(),
                name: name.into(),
                description: description.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Declarative configuration record registered with the remote service.
pub struct AgentDefinition {
    pub model: String,
    pub name: String,
    pub instructions: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<AgentTool>,
}

impl AgentDefinition {
    pub fn new(
        model: impl Into<String>,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<AgentTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Name and instructions must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), AgentsError> {
        if self.name.trim().is_empty() {
            return Err(AgentsError::InvalidDefinition(
                "agent name must not be empty".to_string(),
            ));
        }
        if self.instructions.trim().is_empty() {
            return Err(AgentsError::InvalidDefinition(format!(
                "agent '{}' has empty instructions",
                self.name
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Remote agent handle returned by a creation call.
pub struct Agent {
    pub id: String,
    pub name: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Opaque, service-managed conversation thread handle.
pub struct Thread {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct MessageTextValue {
    value: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MessageContent {
    Text { text: MessageTextValue },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// One message on a thread, as stored by the remote service.
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    #[serde(default)]
    content: Vec<MessageContent>,
}

impl ThreadMessage {
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                MessageContent::Text { text } => text.value.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `RunStatus` values.
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Cancelled | Self::Failed | Self::Completed | Self::Expired
        )
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// Error detail attached to a failed run.
pub struct RunError {
    pub code: String,
    pub message: String,
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// One invocation of an agent against a thread.
pub struct Run {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub last_error: Option<RunError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Sort order for message listings.
pub enum ListOrder {
    Ascending,
    Descending,
}

impl ListOrder {
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Error)]
/// Enumerates supported `AgentsError` values.
pub enum AgentsError {
    #[error("missing service credential")]
    MissingCredential,
    #[error("invalid agent definition: {0}")]
    InvalidDefinition(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
