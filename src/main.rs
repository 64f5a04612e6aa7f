//! # repo-templater CLI
//!
//! Binary entry point. Responsibilities:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and dispatching to the selected command.
//! - Translating library errors into user-facing output.
//!
//! The core logic lives in the library crate; this binary is a thin wrapper
//! around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
