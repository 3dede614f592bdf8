//! Typed client for the hosted agents service: agent registration,
//! conversation threads, messages, and runs.
mod client;
mod types;

pub use client::{AgentsAuthScheme, AgentsClient, AgentsConfig};
pub use types::{
    Agent, AgentDefinition, AgentTool, AgentsError, ConnectedAgentTool, ListOrder, MessageRole,
    Run, RunError, RunStatus, Thread, ThreadMessage,
};
