//! Init command implementation
//!
//! Writes a starter `polish.toml` and `.env.example` into a directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    Success,
    /// `polish.toml` is already present and `--force` was not given
    AlreadyExists,
    /// Not printed here; the caller reports it
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    pub host: String,
    pub port: u16,
    pub model: String,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Polish");

    let base_path = &config.path;
    let config_path = base_path.join("polish.toml");
    if config_path.exists() && !config.force {
        output.warning("polish.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::create_dir_all(base_path) {
        return InitResult::Error(format!("Failed to create {}: {}", base_path.display(), e));
    }

    output.subheader("Creating configuration files");

    if let Err(e) = write_file(&config_path, &generate_polish_toml(&config), config.force) {
        return InitResult::Error(format!("Failed to create polish.toml: {}", e));
    }
    output.created("config", "polish.toml");

    let env_path = base_path.join(".env.example");
    if env_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else if let Err(e) = write_file(&env_path, generate_env_example(), config.force) {
        output.warning(&format!("Failed to create .env.example: {}", e));
    } else {
        output.created("env", ".env.example");
    }

    output.complete("Polish initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Provide your OpenAI credential:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set OPENAI_API_KEY");
    output.newline();
    output.info("2. Start the server:");
    output.command("polish-server");
    output.newline();
    output.info("3. Rewrite some text:");
    output.command("echo 'pls send report by fri' | polish-server rewrite --agent mail");

    output.hint(&format!(
        "The server will listen on http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_polish_toml(config: &InitConfig) -> String {
    format!(
        r#"# Polish configuration
# =====================

[server]
host = "{host}"
port = {port}
# trace, debug, info, warn or error. RUST_LOG takes precedence.
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[provider]
# Environment variable holding the OpenAI API key
api_key_env = "OPENAI_API_KEY"
# Environment variable that overrides `model` when set
model_env = "OPENAI_MODEL"
api_base = "https://api.openai.com/v1"
model = "{model}"
temperature = 0.3
timeout_secs = 30
"#,
        host = config.host,
        port = config.port,
        model = config.model,
    )
}

fn generate_env_example() -> &'static str {
    r#"# Polish Environment Variables
# ============================
# Copy this file to .env and fill in the values.

# REQUIRED: OpenAI API key
OPENAI_API_KEY=sk-...

# Optional: override the configured model
# OPENAI_MODEL=gpt-4o-mini

# Optional: logging filter (overrides server.log_level)
# RUST_LOG=info,polish=debug
"#
}
