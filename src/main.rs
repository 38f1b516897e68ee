//! Roomcalc CLI - Room Cost and Layout Engine
//!
//! Command-line interface for the Roomcalc engine.

use anyhow::Result;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use roomcalc::cli::{commands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Roomcalc v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Some(cmd) => handle_command(cmd, &config),
        None => {
            println!("Roomcalc v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: &roomcalc::EngineConfig) -> Result<()> {
    match cmd {
        Commands::Quote { room, json } => commands::quote(&room, config, json),
        Commands::Layout { room, json } => commands::layout(&room, config, json),
        Commands::Fit {
            max_dim,
            camera,
            ticks,
            dt,
        } => commands::fit(config, max_dim, &camera, ticks, dt),
        Commands::Run { room, script } => commands::run(&room, &script, config),
        Commands::Config => commands::show_config(config),
    }
}
