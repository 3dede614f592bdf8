use clap::{Parser, ValueEnum};
use teller_agents::{AgentsAuthScheme, AgentsConfig};

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Enumerates supported `CliAuthMode` values.
pub enum CliAuthMode {
    Bearer,
    ApiKey,
}

#[derive(Debug, Parser)]
#[command(
    name = "teller",
    about = "Connected-agents banking desk demo against a hosted agents service",
    version
)]
/// Public struct `Cli` used across Teller components.
pub struct Cli {
    #[arg(
        long = "project-endpoint",
        env = "PROJECT_ENDPOINT",
        help = "Base URL of the hosted agents service project"
    )]
    pub project_endpoint: String,

    #[arg(
        long = "model-deployment",
        env = "MODEL_DEPLOYMENT_NAME",
        help = "Model deployment name used for all four agents"
    )]
    pub model_deployment: String,

    #[arg(
        long,
        env = "AGENTS_CREDENTIAL",
        hide_env_values = true,
        help = "Service credential (bearer token or api-key, per --auth-mode)"
    )]
    pub credential: String,

    #[arg(
        long = "auth-mode",
        env = "AGENTS_AUTH_MODE",
        value_enum,
        default_value = "bearer",
        help = "How the credential is attached to requests"
    )]
    pub auth_mode: CliAuthMode,

    #[arg(
        long = "api-version",
        env = "AGENTS_API_VERSION",
        default_value = "2025-05-01",
        help = "api-version query value sent with every service request"
    )]
    pub api_version: String,

    #[arg(
        long = "request-timeout-ms",
        env = "AGENTS_REQUEST_TIMEOUT_MS",
        default_value_t = 120_000,
        value_parser = parse_positive_u64,
        help = "Per-request timeout for service calls"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "poll-interval-ms",
        env = "AGENTS_POLL_INTERVAL_MS",
        default_value_t = 500,
        value_parser = parse_positive_u64,
        help = "Delay between run status polls while a turn is processing"
    )]
    pub poll_interval_ms: u64,
}

impl Cli {
    pub fn agents_config(&self) -> AgentsConfig {
        AgentsConfig {
            endpoint: self.project_endpoint.clone(),
            credential: self.credential.clone(),
            auth_scheme: match self.auth_mode {
                CliAuthMode::Bearer => AgentsAuthScheme::Bearer,
                CliAuthMode::ApiKey => AgentsAuthScheme::ApiKeyHeader,
            },
            api_version: self.api_version.clone(),
            request_timeout_ms: self.request_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}
