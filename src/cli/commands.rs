//! Handlers for the non-server subcommands

use super::output::Output;
use crate::agents::{AgentDefinition, AgentRegistry};
use crate::shell::state::EMPTY_INPUT_MESSAGE;
use crate::shell::{
    Clipboard, CopyOutcome, GenerateOutcome, HttpGatewayClient, NoClipboard, Osc52Clipboard,
    Shell, SubmitRejection,
};
use crate::utils::toml_config::PolishConfig;
use anyhow::{Context, bail};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Print the resolved configuration, or only validate it
pub fn show_config(path: &Path, validate: bool, output: &Output) -> anyhow::Result<()> {
    let (config, found) = PolishConfig::load_or_default(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    if validate {
        if found {
            output.success(&format!("{} is valid", path.display()));
        } else {
            output.warning(&format!(
                "{} not found, built-in defaults are valid",
                path.display()
            ));
        }
        return Ok(());
    }

    let settings = config.provider_settings();
    let credential = if settings.has_credential() {
        format!("set ({})", settings.api_key_env)
    } else {
        format!("unset ({})", settings.api_key_env)
    };

    output.header("Configuration");
    if found {
        output.kv("file", &path.display().to_string());
    } else {
        output.kv("file", "<built-in defaults>");
    }

    output.subheader("Server");
    output.kv("bind", &config.server.bind_address());
    output.kv("log_level", &config.server.log_level);
    output.kv("log_format", &config.server.log_format);

    output.subheader("Provider");
    output.kv("api_base", &settings.api_base);
    output.kv("model", &settings.model);
    output.kv("temperature", &settings.temperature.to_string());
    output.kv("timeout", &format!("{}s", settings.timeout.as_secs()));
    output.kv("credential", &credential);
    output.newline();

    Ok(())
}

pub fn list_agents(registry: &AgentRegistry, output: &Output) {
    output.header("Agents");
    output.table_header(&["Id", "Name", "Description"]);
    for agent in registry.list() {
        output.table_row(&[&agent.id, &agent.name, &agent.description]);
    }
    output.newline();
}

pub fn show_agent(registry: &AgentRegistry, id: &str, output: &Output) -> anyhow::Result<()> {
    let Some(agent) = registry.find_by_id(id) else {
        let known: Vec<&str> = registry.list().iter().map(|a| a.id.as_str()).collect();
        bail!("Unknown agent '{}'. Available: {}", id, known.join(", "));
    };

    output.header(&agent.name);
    output.kv("id", &agent.id);
    output.kv("description", &agent.description);
    output.kv("placeholder", &agent.placeholder);
    output.subheader("System prompt");
    output.block(&agent.prompt);
    output.newline();

    Ok(())
}

/// Build a registry from the agents a running server advertises
pub async fn remote_registry(client: &HttpGatewayClient) -> anyhow::Result<AgentRegistry> {
    let agents = client
        .list_agents()
        .await
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to list agents from {}", client.base_url()))?;

    let agents: Vec<AgentDefinition> = agents.into_iter().map(Into::into).collect();
    Ok(AgentRegistry::new(agents)?)
}

/// Terminal clipboard, or none when stdout is not a terminal
pub fn terminal_clipboard() -> Arc<dyn Clipboard> {
    use std::io::IsTerminal;

    if std::io::stdout().is_terminal() {
        Arc::new(Osc52Clipboard::stdout())
    } else {
        Arc::new(NoClipboard)
    }
}

/// One generation through the shell against `server`
pub async fn rewrite(
    server: &str,
    agent: &str,
    text: Option<String>,
    copy: bool,
    output: &Output,
) -> anyhow::Result<()> {
    let input = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read text from stdin")?;
            buf
        }
    };

    let client = HttpGatewayClient::new(server);
    let registry = remote_registry(&client).await?;
    let shell = Shell::new(Arc::new(registry), Arc::new(client), terminal_clipboard());

    shell.select_agent(agent)?;
    shell.set_input(input);

    match shell.generate().await {
        GenerateOutcome::Completed(result) => println!("{}", result),
        GenerateOutcome::Failed(message) => bail!(message),
        GenerateOutcome::Rejected(SubmitRejection::EmptyInput) => bail!(EMPTY_INPUT_MESSAGE),
        GenerateOutcome::Rejected(SubmitRejection::InFlight) => {
            bail!("A generation is already running")
        }
    }

    if copy {
        match shell.copy_output() {
            Ok(CopyOutcome::Copied) => output.success("Copied to clipboard"),
            Ok(CopyOutcome::Unavailable) => output.warning("Nothing to copy"),
            Err(e) => output.warning(&e.to_string()),
        }
    }

    Ok(())
}
