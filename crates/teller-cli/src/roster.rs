use teller_agents::{Agent, AgentDefinition, AgentTool, AgentsClient, AgentsError};

pub(crate) const SCANNER_AGENT_NAME: &str = "scanner_agent";
pub(crate) const TRANSFER_AGENT_NAME: &str = "transfer_agent";
pub(crate) const RISK_AGENT_NAME: &str = "risk_agent";
pub(crate) const PLANNER_AGENT_NAME: &str = "planner_agent";

const SCANNER_AGENT_INSTRUCTIONS: &str = "\
You are the Scanning Agent. Your responsibility is to process and analyze the \
user passcode that looks like a social security number for identity \
verification and billing confirmation. Extract relevant data accurately, \
validate authenticity, and flag any anomalies for further review. Communicate \
results back to the Planner Agent promptly.";

const TRANSFER_AGENT_INSTRUCTIONS: &str = "\
You are the Transfer Tool. Your role is to execute account transfers securely \
using function calling. Validate transaction details, confirm authorization, \
and ensure compliance with financial and security protocols. Report success \
or failure to the Planner Agent.";

const RISK_AGENT_INSTRUCTIONS: &str = "\
You are the Risk Agent. Your responsibility is to analyze historical online \
conversations and related data to assess potential risks. Identify fraud \
indicators, compliance issues, or suspicious patterns, and provide a risk \
score or mitigation recommendation to the Planner Agent.";

const PLANNER_AGENT_INSTRUCTIONS: &str = "\
You are the Planner Agent. Your role is to orchestrate the workflow by \
analyzing customer requests, breaking them into actionable steps, and \
delegating tasks to the appropriate agents. Maintain context across the \
process, ensure compliance with security and business rules, and monitor \
progress until completion.";

const SCANNER_TOOL_DESCRIPTION: &str = "\
Activate when the Planner Agent determines that identity verification or \
billing confirmation is required. Trigger upon receiving a passcode from the \
customer for validation. Ensure it resembles a valid social security number \
and its authenticity is verified before proceeding.";

const TRANSFER_TOOL_DESCRIPTION: &str = "\
Activate after the Planner Agent confirms that all identity and billing \
checks are complete. Trigger when a funds transfer or account movement is \
requested as part of the workflow. Validate transaction details and execute \
the transfer securely, then return confirmation to the Planner Agent.";

const RISK_TOOL_DESCRIPTION: &str = "\
Activate when the Planner Agent needs a risk assessment before completing a \
transaction. Trigger if historical data or conversation analysis is required \
to detect fraud or compliance issues. Provide a risk score and mitigation \
recommendations before final approval.";

/// The four remote agent handles owned by one demo session. Specialists are
/// created before the planner that references them; every id is deleted
/// exactly once at teardown.
#[derive(Debug, Clone)]
pub(crate) struct AgentRoster {
    pub(crate) scanner: Agent,
    pub(crate) transfer: Agent,
    pub(crate) risk: Agent,
    pub(crate) planner: Agent,
}

impl AgentRoster {
    pub(crate) async fn deploy(
        client: &AgentsClient,
        model: &str,
    ) -> Result<Self, AgentsError> {
        let scanner = client
            .create_agent(&AgentDefinition::new(
                model,
                SCANNER_AGENT_NAME,
                SCANNER_AGENT_INSTRUCTIONS,
            ))
            .await?;
        let transfer = client
            .create_agent(&AgentDefinition::new(
                model,
                TRANSFER_AGENT_NAME,
                TRANSFER_AGENT_INSTRUCTIONS,
            ))
            .await?;
        let risk = client
            .create_agent(&AgentDefinition::new(
                model,
                RISK_AGENT_NAME,
                RISK_AGENT_INSTRUCTIONS,
            ))
            .await?;

        let planner = client
            .create_agent(
                &AgentDefinition::new(model, PLANNER_AGENT_NAME, PLANNER_AGENT_INSTRUCTIONS)
                    .with_tools(planner_tools(&scanner, &transfer, &risk)),
            )
            .await?;

        Ok(Self {
            scanner,
            transfer,
            risk,
            planner,
        })
    }

    /// Issues one delete per created id. A failed delete is reported and the
    /// remaining ids are still released.
    pub(crate) async fn teardown(self, client: &AgentsClient) {
        for agent in [self.scanner, self.transfer, self.risk, self.planner] {
            match client.delete_agent(&agent.id).await {
                Ok(()) => println!("Deleted {}.", agent.name),
                Err(error) => {
                    tracing::warn!("failed to delete agent {}: {error}", agent.name);
                }
            }
        }
    }
}

pub(crate) fn planner_tools(scanner: &Agent, transfer: &Agent, risk: &Agent) -> Vec<AgentTool> {
    vec![
        AgentTool::connected_agent(
            scanner.id.as_str(),
            SCANNER_AGENT_NAME,
            SCANNER_TOOL_DESCRIPTION,
        ),
        AgentTool::connected_agent(
            transfer.id.as_str(),
            TRANSFER_AGENT_NAME,
            TRANSFER_TOOL_DESCRIPTION,
        ),
        AgentTool::connected_agent(risk.id.as_str(), RISK_AGENT_NAME, RISK_TOOL_DESCRIPTION),
    ]
}
