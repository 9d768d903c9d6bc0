//! rollbook library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // Operator scoping: the CLI flag wins over the configured default.
    let operator = cli
        .operator
        .clone()
        .unwrap_or_else(|| cfg.default_operator.clone());

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Program { .. } => cli::commands::program::handle(&cli.command, cfg, &operator),
        Commands::Member { .. } => cli::commands::member::handle(&cli.command, cfg, &operator),
        Commands::Mark { .. } => cli::commands::mark::handle(&cli.command, cfg, &operator),
        Commands::Sheet { .. } => cli::commands::sheet::handle(&cli.command, cfg, &operator),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg, &operator),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, &operator),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once; --db overrides the configured database path.
    let mut cfg = Config::load();

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
