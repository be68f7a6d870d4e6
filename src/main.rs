//! Brevilabs - command-line client for the Brevilabs backend
//!
//! Thin binary entry point that delegates to modular CLI handlers.

use anyhow::Result;
use brevilabs_config::DebugConfig;
use brevilabs_config::api_keys::load_dotenv;
use brevilabs_config::loader::resolve_config_path;
use clap::Parser;

mod cli;
mod notice;
mod startup;

use cli::args::{BackendCommand, Cli, Commands};
use startup::StartupContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (non-fatal if missing)
    load_dotenv().ok();

    let args = Cli::parse();
    let config_path = resolve_config_path(args.config.as_deref());

    match &args.command {
        Commands::Init { force } => {
            initialize_tracing(None);
            cli::init::handle_init_command(&config_path, *force)
        }
        Commands::Backend(command) => {
            let startup = StartupContext::load(&args, config_path)?;
            initialize_tracing(Some(&startup.config.debug));
            run_backend_command(&startup, command).await
        }
    }
}

async fn run_backend_command(startup: &StartupContext, command: &BackendCommand) -> Result<()> {
    use cli::endpoints;

    match command {
        BackendCommand::License { command } => {
            cli::license::handle_license_command(startup, command).await
        }
        BackendCommand::Broca { message } => {
            endpoints::handle_broca_command(startup, message).await
        }
        BackendCommand::Rerank { query, documents } => {
            endpoints::handle_rerank_command(startup, query, documents).await
        }
        BackendCommand::Url { url } => endpoints::handle_url_command(startup, url).await,
        BackendCommand::Pdf { path } => endpoints::handle_pdf_command(startup, path).await,
        BackendCommand::Search { query } => endpoints::handle_search_command(startup, query).await,
        BackendCommand::Youtube { url } => endpoints::handle_youtube_command(startup, url).await,
    }
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence; otherwise
/// the `[debug]` section decides whether anything is logged at all.
fn initialize_tracing(debug_cfg: Option<&DebugConfig>) {
    use tracing_subscriber::EnvFilter;

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if let Some(cfg) = debug_cfg.filter(|cfg| cfg.enable_tracing) {
        EnvFilter::new(cfg.filter_directive())
    } else {
        return;
    };

    // Keep stdout clean for JSON output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    if let Some(cfg) = debug_cfg.filter(|cfg| cfg.enable_tracing) {
        tracing::debug!(
            "Debug tracing enabled: directive={}, level={}",
            cfg.filter_directive(),
            cfg.trace_level
        );
    }
}
