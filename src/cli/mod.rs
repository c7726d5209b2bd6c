//! CLI module for Polish
//!
//! Command-line parsing for the `polish-server` binary plus the handlers for
//! each subcommand. Uses clap for argument parsing and owo-colors for colored
//! terminal output.

pub mod commands;
pub mod init;
pub mod output;
pub mod repl;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Server used by the client commands when `--server` is not given
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Polish - agent-based text rewriting
///
/// Rewrites free text in the voice of a selected agent by forwarding it to
/// an OpenAI chat completion model.
#[derive(Parser, Debug)]
#[command(
    name = "polish-server",
    version,
    about = "Polish - agent-based text rewriting",
    long_about = "Rewrites free text in the voice of a selected agent (mail, commit,\n\
                  diary, standup) using an OpenAI chat completion model.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  polish-server                          # Start the server (reads polish.toml)\n    \
                  polish-server init                     # Write a starter polish.toml\n    \
                  polish-server agent list               # Show the available agents\n    \
                  polish-server rewrite --agent commit 'fixed the login bug'\n    \
                  polish-server shell                    # Interactive rewriting session"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "polish.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter polish.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Chat completion model
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
    },

    /// Show the resolved configuration
    Config {
        /// Only validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Inspect the built-in agents
    #[command(subcommand)]
    Agent(AgentCommands),

    /// Rewrite text once through a running server
    Rewrite {
        /// Agent to rewrite with
        #[arg(short, long, default_value = "mail")]
        agent: String,

        /// Base URL of the Polish server
        #[arg(short, long, env = "POLISH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Also copy the result to the terminal clipboard
        #[arg(long)]
        copy: bool,

        /// Text to rewrite (read from stdin when omitted)
        text: Option<String>,
    },

    /// Start an interactive rewriting session against a running server
    Shell {
        /// Base URL of the Polish server
        #[arg(short, long, env = "POLISH_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}

/// Agent inspection subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List all agents
    List,

    /// Show details for a specific agent
    Show {
        /// Id of the agent
        id: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
