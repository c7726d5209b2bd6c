use polish::{
    AgentRegistry, AppState, PolishConfig,
    api::routes::create_app,
    cli::{
        AgentCommands, Cli, Commands, commands,
        init::{self, InitConfig, InitResult},
        output::Output,
        repl,
    },
    utils::toml_config::ServerConfig,
};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        None => serve(&cli.config).await,
        Some(command) => {
            init_client_tracing(cli.verbose);
            let result = run_command(command, &cli.config, &output).await;
            if let Err(e) = &result {
                output.error(&format!("{:#}", e));
                std::process::exit(1);
            }
            result
        }
    }
}

async fn run_command(command: Commands, config_path: &Path, output: &Output) -> anyhow::Result<()> {
    match command {
        Commands::Init {
            path,
            force,
            host,
            port,
            model,
        } => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
                model,
            };
            match init::run(config, output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!(e),
            }
        }
        Commands::Config { validate } => commands::show_config(config_path, validate, output),
        Commands::Agent(AgentCommands::List) => {
            commands::list_agents(&AgentRegistry::builtin(), output);
            Ok(())
        }
        Commands::Agent(AgentCommands::Show { id }) => {
            commands::show_agent(&AgentRegistry::builtin(), &id, output)
        }
        Commands::Rewrite {
            agent,
            server,
            copy,
            text,
        } => commands::rewrite(&server, &agent, text, copy, output).await,
        Commands::Shell { server } => repl::run(&server, output).await,
    }
}

/// Logging for the client commands: warnings only unless `--verbose`, on stderr
fn init_client_tracing(verbose: bool) {
    let default = if verbose { "polish=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}

/// `RUST_LOG` wins over the configured level
fn init_server_tracing(server: &ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}

async fn serve(config_path: &Path) -> anyhow::Result<()> {
    let (config, found) = PolishConfig::load_or_default(config_path)?;
    init_server_tracing(&config.server)?;

    if !found {
        warn!(
            path = %config_path.display(),
            "configuration file not found, using built-in defaults"
        );
    }

    let settings = config.provider_settings();
    if !settings.has_credential() {
        warn!(
            env = %settings.api_key_env,
            "no provider credential set, completion requests will fail"
        );
    }

    let bind_address = config.server.bind_address();
    let state = AppState::from_config(config)?;
    info!(
        agents = state.agent_registry.len(),
        model = %settings.model,
        "agent registry loaded"
    );

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Polish server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
