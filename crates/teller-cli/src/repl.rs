use std::io::{IsTerminal, Write};

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use rustyline::{
    error::ReadlineError, history::DefaultHistory, Config as ReadlineConfig, Editor,
};
use teller_agents::{AgentsClient, ListOrder, MessageRole, RunStatus};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::print_thread_message;

const EXIT_SENTINEL: &str = ":)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Clone, Copy)]
pub(crate) struct ReplContext<'a> {
    pub(crate) client: &'a AgentsClient,
    pub(crate) thread_id: &'a str,
    pub(crate) planner_id: &'a str,
}

pub(crate) fn is_exit_command(input: &str) -> bool {
    input.trim() == EXIT_SENTINEL
}

fn repl_prompt() -> String {
    format!("\n{} ", "User :".green())
}

pub(crate) async fn run_repl(ctx: ReplContext<'_>) -> Result<()> {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        run_repl_tty(ctx).await
    } else {
        run_repl_stdin(ctx).await
    }
}

async fn run_repl_stdin(ctx: ReplContext<'_>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{}", repl_prompt());
        std::io::stdout()
            .flush()
            .context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match dispatch_turn(ctx, &line).await? {
            LoopControl::Continue => continue,
            LoopControl::Exit => break,
        }
    }

    Ok(())
}

async fn run_repl_tty(ctx: ReplContext<'_>) -> Result<()> {
    let config = ReadlineConfig::builder().build();
    let mut editor = Editor::<(), DefaultHistory>::with_config(config)
        .context("failed to initialize interactive editor")?;
    let prompt = repl_prompt();

    loop {
        let readline = tokio::task::block_in_place(|| editor.readline(&prompt));
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => return Err(anyhow!("failed to read interactive input: {error}")),
        };

        match dispatch_turn(ctx, &line).await? {
            LoopControl::Continue => continue,
            LoopControl::Exit => break,
        }
    }

    Ok(())
}

/// One conversational turn: forward the input to the thread, run the planner
/// to a terminal status, then print the newest message. A failed run is
/// reported and the loop keeps going; any transport error propagates.
pub(crate) async fn dispatch_turn(ctx: ReplContext<'_>, input: &str) -> Result<LoopControl> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(LoopControl::Continue);
    }

    if is_exit_command(input) {
        println!("Conversation ended.");
        return Ok(LoopControl::Exit);
    }

    ctx.client
        .create_message(ctx.thread_id, MessageRole::User, trimmed)
        .await?;

    println!("\nProcessing agent thread. Please wait...");
    let run = ctx
        .client
        .create_and_process(ctx.thread_id, ctx.planner_id)
        .await?;

    if run.status == RunStatus::Failed {
        let detail = run
            .last_error
            .map(|error| error.to_string())
            .unwrap_or_else(|| "no error detail reported".to_string());
        println!("Run failed: {detail}");
        return Ok(LoopControl::Continue);
    }

    let messages = ctx
        .client
        .list_messages(ctx.thread_id, ListOrder::Descending, Some(1))
        .await?;
    if let Some(latest) = messages.first() {
        print_thread_message(latest);
    }

    Ok(LoopControl::Continue)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use teller_agents::{AgentsAuthScheme, AgentsClient, AgentsConfig};

    use super::{dispatch_turn, is_exit_command, LoopControl, ReplContext};

    fn test_client(server: &MockServer) -> AgentsClient {
        AgentsClient::new(AgentsConfig {
            endpoint: server.base_url(),
            credential: "test-credential".to_string(),
            auth_scheme: AgentsAuthScheme::Bearer,
            api_version: "2025-05-01".to_string(),
            request_timeout_ms: 5_000,
            poll_interval_ms: 1,
        })
        .expect("client should build")
    }

    #[test]
    fn exit_sentinel_requires_exact_trimmed_match() {
        assert!(is_exit_command(":)"));
        assert!(is_exit_command("  :)  "));
        assert!(is_exit_command("\t:)\n"));
        assert!(!is_exit_command(":))"));
        assert!(!is_exit_command(": )"));
        assert!(!is_exit_command(""));
        assert!(!is_exit_command("quit"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn exit_sentinel_ends_the_loop_without_network_calls() {
        let server = MockServer::start();
        let any_call = server.mock(|when, then| {
            when.path_includes("/threads");
            then.status(200).json_body(json!({}));
        });

        let client = test_client(&server);
        let ctx = ReplContext {
            client: &client,
            thread_id: "th_1",
            planner_id: "asst_plan",
        };

        let control = dispatch_turn(ctx, "  :)  ")
            .await
            .expect("sentinel turn should succeed");
        assert_eq!(control, LoopControl::Exit);
        any_call.assert_hits(0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn blank_input_reprompts_without_network_calls() {
        let server = MockServer::start();
        let any_call = server.mock(|when, then| {
            when.path_includes("/threads");
            then.status(200).json_body(json!({}));
        });

        let client = test_client(&server);
        let ctx = ReplContext {
            client: &client,
            thread_id: "th_1",
            planner_id: "asst_plan",
        };

        let control = dispatch_turn(ctx, "   \t ")
            .await
            .expect("blank turn should succeed");
        assert_eq!(control, LoopControl::Continue);
        any_call.assert_hits(0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_run_prints_detail_and_keeps_the_loop_running() {
        let server = MockServer::start();
        let message = server.mock(|when, then| {
            when.method(POST).path("/threads/th_1/messages");
            then.status(200).json_body(json!({
                "id": "msg_1",
                "role": "user",
                "content": [{"type": "text", "text": {"value": "hi", "annotations": []}}]
            }));
        });
        let run = server.mock(|when, then| {
            when.method(POST).path("/threads/th_1/runs");
            then.status(200).json_body(json!({
                "id": "run_1",
                "status": "failed",
                "last_error": {"code": "server_error", "message": "overloaded"}
            }));
        });
        let listing = server.mock(|when, then| {
            when.method(GET).path("/threads/th_1/messages");
            then.status(200).json_body(json!({"object": "list", "data": []}));
        });

        let client = test_client(&server);
        let ctx = ReplContext {
            client: &client,
            thread_id: "th_1",
            planner_id: "asst_plan",
        };

        let control = dispatch_turn(ctx, "check my balance")
            .await
            .expect("failed run must not abort the loop");

        assert_eq!(control, LoopControl::Continue);
        message.assert_hits(1);
        run.assert_hits(1);
        // No message fetch happens after a failed run.
        listing.assert_hits(0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn completed_run_fetches_the_latest_message() {
        let server = MockServer::start();
        let message = server.mock(|when, then| {
            when.method(POST)
                .path("/threads/th_1/messages")
                .json_body_includes(json!({"role": "user", "content": "hello"}).to_string());
            then.status(200).json_body(json!({
                "id": "msg_1",
                "role": "user",
                "content": [{"type": "text", "text": {"value": "hello", "annotations": []}}]
            }));
        });
        let run = server.mock(|when, then| {
            when.method(POST).path("/threads/th_1/runs");
            then.status(200)
                .json_body(json!({"id": "run_1", "status": "completed"}));
        });
        let listing = server.mock(|when, then| {
            when.method(GET)
                .path("/threads/th_1/messages")
                .query_param("order", "desc")
                .query_param("limit", "1");
            then.status(200).json_body(json!({
                "object": "list",
                "data": [{
                    "id": "msg_2",
                    "role": "assistant",
                    "content": [{"type": "text", "text": {"value": "how can I help?", "annotations": []}}]
                }]
            }));
        });

        let client = test_client(&server);
        let ctx = ReplContext {
            client: &client,
            thread_id: "th_1",
            planner_id: "asst_plan",
        };

        let control = dispatch_turn(ctx, "hello")
            .await
            .expect("turn should complete");

        assert_eq!(control, LoopControl::Continue);
        message.assert_hits(1);
        run.assert_hits(1);
        listing.assert_hits(1);
    }
}
