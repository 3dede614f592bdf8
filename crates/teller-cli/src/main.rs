mod bootstrap;
mod cli_args;
mod render;
mod repl;
mod roster;

use anyhow::Result;
use clap::Parser;
use teller_agents::AgentsClient;

use crate::bootstrap::init_tracing;
use crate::cli_args::Cli;
use crate::repl::ReplContext;
use crate::roster::AgentRoster;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let client = AgentsClient::new(cli.agents_config())?;
    let roster = AgentRoster::deploy(&client, &cli.model_deployment).await?;

    // The roster is released even when a conversational turn errors out;
    // only the session outcome decides the process exit status.
    let outcome = converse(&client, &roster).await;

    println!("Cleaning up agents:");
    roster.teardown(&client).await;
    outcome
}

async fn converse(client: &AgentsClient, roster: &AgentRoster) -> Result<()> {
    println!("Creating agent thread.");
    let thread = client.create_thread().await?;
    repl::run_repl(ReplContext {
        client,
        thread_id: &thread.id,
        planner_id: &roster.planner.id,
    })
    .await
}
