// crates/sman-cli/src/main.rs - CLI Application Entry Point
//
// ARCHITECTURE OVERVIEW:
// ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────────┐
// │   User Input    │───▶│   CLI Parser     │───▶│  Command Handlers   │
// │ (clap commands) │    │ (main function)  │    │ (commands/*.rs)     │
// └─────────────────┘    └──────────────────┘    └─────────────────────┘
//                                 │                        │
//                                 ▼                        ▼
//                        ┌──────────────────┐    ┌─────────────────────┐
//                        │     Context      │    │     Services        │
//                        │ (config + dir)   │    │ (loading, executor) │
//                        └──────────────────┘    └─────────────────────┘
//
// The query and templating logic lives in sman-core; this crate only wires
// arguments, configuration, terminal I/O and process execution around it.
//
// EXAMPLE USAGE:
// ```bash
// sman init                                # Create ~/snippets and a config file
// sman ls docker                           # Search snippets
// sman ls -t net+debug --porcelain | cut -f2
// sman run add_user -i user=alice          # Fill placeholders and execute
// ```

use anyhow::Result;
use clap::Parser;
use sman_core::{ConfigError, ConfigManager, SmanConfig};
use tracing::Level;

mod cli; // Command-line interface definitions
mod commands; // Command implementations
mod context; // Configuration and services passed to commands
mod services; // Snippet loading and command execution
mod stdin; // Interactive prompts

use cli::{Cli, Commands};
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => {
            // init must work before any config file exists
            let config = ConfigManager::load_config(cli.config.as_deref()).or_else(|e| match e {
                ConfigError::FileNotFound(_) => Ok(SmanConfig::default()),
                other => Err(other),
            })?;
            let snippet_dir = path.or(cli.snippet_dir).unwrap_or_else(|| config.snippet_path());
            commands::init::handle(snippet_dir, cli.config.as_deref())
        }
        #[cfg(feature = "completions")]
        Commands::Completions { shell } => commands::completions::handle(shell),
        command => {
            let ctx = Context::new(cli.config.as_deref(), cli.snippet_dir)?;
            dispatch(&ctx, command)
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Ls {
            filter,
            porcelain,
            json,
        } => commands::list::handle(ctx, filter, porcelain, json),
        Commands::Show { name, file } => commands::show::handle(ctx, name, file),
        Commands::Run {
            filter,
            inputs,
            yes,
            dry_run,
        } => commands::run::handle(ctx, filter, inputs, yes, dry_run),
        Commands::Init { .. } => unreachable!(), // Handled before the context exists
        #[cfg(feature = "completions")]
        Commands::Completions { .. } => unreachable!(),
    }
}

/// Log to stderr; -v raises the level from WARN up to TRACE
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
