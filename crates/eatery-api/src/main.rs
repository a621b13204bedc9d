//! Eatery CLI entry point.
//!
//! Binary name: `eatery`
//!
//! Parses CLI arguments, loads configuration, initializes tracing and the
//! database, then dispatches to the restaurant command handlers.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use eatery_infra::config::{load_global_config, resolve_data_dir};
use eatery_observe::tracing_setup::{
    LogFormat, TracingOptions, init_tracing, shutdown_tracing, verbosity_filter,
};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config, tracing, or a database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "eatery", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    init_tracing(&TracingOptions {
        filter: verbosity_filter(cli.verbose, cli.quiet).to_string(),
        format: if cli.log_json { LogFormat::Json } else { LogFormat::Pretty },
        enable_otel: cli.otel || config.enable_otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, &data_dir, &config).await;
    shutdown_tracing();
    result
}

async fn run(
    cli: Cli,
    data_dir: &std::path::Path,
    config: &eatery_types::config::GlobalConfig,
) -> anyhow::Result<()> {
    let state = AppState::init(data_dir, config).await?;
    tracing::info!(database = %state.database_path.display(), "Eatery ready");

    match cli.command {
        Commands::Create { fields } => {
            cli::restaurant::create_restaurant(&state, fields, cli.json).await?;
        }

        Commands::Show { id } => {
            cli::restaurant::show_restaurant(&state, &id, cli.json).await?;
        }

        Commands::List(args) => {
            cli::restaurant::list_restaurants(&state, args, cli.json).await?;
        }

        Commands::Update { id, fields } => {
            cli::restaurant::update_restaurant(&state, &id, fields, cli.json).await?;
        }

        Commands::Delete { id, hard } => {
            cli::restaurant::delete_restaurant(&state, &id, hard, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}
