//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// repo-templater - keep repositories in sync with shared file-tree templates
#[derive(Parser, Debug)]
#[command(name = "repo-templater")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone, render, review and push every configured repository
    Run(commands::run::RunArgs),

    /// Resolve variables and render templates only, without touching git
    Render(commands::render::RenderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level = self
            .log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info);
        env_logger::Builder::new()
            .filter_level(level)
            .try_init()
            .ok();

        match self.command {
            Commands::Run(args) => commands::run::execute(args),
            Commands::Render(args) => commands::render::execute(args),
        }
    }
}
