//! Interactive terminal front end for the shell

use super::commands::{remote_registry, terminal_clipboard};
use super::output::Output;
use crate::shell::{
    CopyOutcome, CopyStatus, GenerateOutcome, HttpGatewayClient, Shell, SubmitRejection,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Agents,
    Agent(String),
    Run,
    Copy,
    Clear,
    Show,
    Help,
    Quit,
    Unknown(String),
    /// Plain text appended to the input
    Text(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ReplCommand::Text(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "agents" => ReplCommand::Agents,
            "agent" if !arg.is_empty() => ReplCommand::Agent(arg.to_string()),
            "run" => ReplCommand::Run,
            "copy" => ReplCommand::Copy,
            "clear" => ReplCommand::Clear,
            "show" => ReplCommand::Show,
            "help" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

fn print_help(output: &Output) {
    output.header("Commands");
    output.kv("/agents", "list agents");
    output.kv("/agent <id>", "select an agent");
    output.kv("/run", "rewrite the current input");
    output.kv("/copy", "copy the last result to the clipboard");
    output.kv("/clear", "clear the input");
    output.kv("/show", "show input and output");
    output.kv("/quit", "leave the shell");
    output.hint("Any other line is appended to the input.");
}

fn print_view(shell: &Shell, output: &Output) {
    let view = shell.view();
    output.header(&format!("{} ({})", view.agent_name, view.agent_id));
    output.subheader("Input");
    if view.input.is_empty() {
        output.block(&view.placeholder);
    } else if view.masked {
        output.block("[hidden after inactivity]");
    } else {
        output.block(&view.input);
    }
    output.subheader("Output");
    output.block(&view.output);
    if let Some(error) = &view.error {
        output.error(error);
    }
    match view.copy_status {
        CopyStatus::Copied => output.success("Copied"),
        CopyStatus::Failed => output.warning("Copy failed"),
        CopyStatus::Idle => {}
    }
}

/// Run the interactive session until `/quit` or end of input
pub async fn run(server: &str, output: &Output) -> anyhow::Result<()> {
    let client = HttpGatewayClient::new(server);
    let registry = remote_registry(&client).await?;
    let shell = Shell::new(Arc::new(registry), Arc::new(client), terminal_clipboard());

    output.banner();
    output.info(&format!("Connected to {}", server));
    print_help(output);
    output.newline();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        output.prompt(&shell.view().agent_id);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Agents => {
                let selected = shell.view().agent_id;
                for agent in shell.registry().list() {
                    let marker = if agent.id == selected { "*" } else { " " };
                    output.list_item(&format!(
                        "{} {} - {}",
                        marker, agent.id, agent.description
                    ));
                }
            }
            ReplCommand::Agent(id) => match shell.select_agent(&id) {
                Ok(()) => output.success(&format!("Selected {}", id)),
                Err(e) => output.error(&e.public_message()),
            },
            ReplCommand::Run => {
                output.info(crate::shell::state::GENERATING_MESSAGE);
                match shell.generate().await {
                    GenerateOutcome::Completed(result) => {
                        output.subheader("Output");
                        output.block(&result);
                    }
                    GenerateOutcome::Failed(message) => output.error(&message),
                    GenerateOutcome::Rejected(SubmitRejection::EmptyInput) => {
                        if let Some(message) = shell.view().error {
                            output.error(&message);
                        }
                    }
                    GenerateOutcome::Rejected(SubmitRejection::InFlight) => {
                        output.warning("A generation is already running")
                    }
                }
            }
            ReplCommand::Copy => match shell.copy_output() {
                Ok(CopyOutcome::Copied) => output.success("Copied"),
                Ok(CopyOutcome::Unavailable) => output.warning("Nothing to copy yet"),
                Err(e) => output.warning(&e.to_string()),
            },
            ReplCommand::Clear => {
                shell.set_input(String::new());
                output.info("Input cleared");
            }
            ReplCommand::Show => print_view(&shell, output),
            ReplCommand::Help => print_help(output),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(command) => {
                output.warning(&format!("Unknown command: {}", command));
                output.hint("Type /help for the list of commands");
            }
            ReplCommand::Text(text) => shell.append_line(&text),
        }
    }

    Ok(())
}
