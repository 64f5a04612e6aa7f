//! Run command implementation
//!
//! Drives the full lifecycle: parse and resolve the configuration, recreate
//! the scratch `input/` directory, then clone → render → post-commands →
//! review/commit → push via the orchestrator. The scratch directory is
//! removed afterwards unless `--keep-input` is given, even when the run
//! fails.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::{info, warn};

use repo_templater::config::{self, Config, TEMPLATES_DIR};
use repo_templater::git::SystemGit;
use repo_templater::phases::orchestrator;
use repo_templater::phases::{RunOptions, Selection};
use repo_templater::prompt::TerminalPrompt;
use repo_templater::resolve;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory containing the config file and template trees
    #[arg(long, value_name = "PATH", default_value = ".", env = "REPO_TEMPLATER_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Commit message used for every repository
    #[arg(long, value_name = "MSG", default_value = "update repository template")]
    pub commit_msg: String,

    /// Commit and push changes (without this flag the run is a dry run)
    #[arg(long)]
    pub push: bool,

    /// Clone repositories from this branch instead of each remote's default
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Limit the run to one repository
    #[arg(long, value_name = "NAME", conflicts_with = "skip_repository")]
    pub repository: Option<String>,

    /// Skip a repository; can be given multiple times
    #[arg(long = "skip-repository", value_name = "NAME")]
    pub skip_repository: Vec<String>,

    /// Extra command to run in every repository after rendering; can be
    /// given multiple times, tokens split on whitespace
    #[arg(long = "run-command", value_name = "CMD")]
    pub run_command: Vec<String>,

    /// Keep the scratch input directory after the run
    #[arg(long)]
    pub keep_input: bool,
}

/// Execute the run command
pub fn execute(args: RunArgs) -> Result<()> {
    let config_path = args.config_dir.join(config::CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!("configuration file not found: {}", config_path.display());
    }

    let config = config::from_file(&config_path)?;
    let mut config = resolve::resolve(config)?;

    append_run_commands(&mut config, &args.run_command);

    let selection = match (&args.repository, &args.skip_repository[..]) {
        (Some(name), _) => Selection::Only(name.clone()),
        (None, []) => Selection::All,
        (None, skipped) => Selection::Skip(skipped.to_vec()),
    };

    let input_dir = args.config_dir.join("input");
    if input_dir.exists() {
        fs::remove_dir_all(&input_dir)?;
    }
    fs::create_dir_all(&input_dir)?;

    let options = RunOptions {
        input_dir: input_dir.clone(),
        output_dir: input_dir.clone(),
        templates_root: args.config_dir.join(TEMPLATES_DIR),
        commit_message: args.commit_msg,
        push: args.push,
        branch: args.branch,
    };

    let git = SystemGit;
    let mut prompt = TerminalPrompt;
    let result = orchestrator::execute_run(&config, &selection, &git, &mut prompt, &options);

    if !args.keep_input {
        if let Err(e) = fs::remove_dir_all(&input_dir) {
            warn!("cannot remove scratch directory {}: {}", input_dir.display(), e);
        }
    }

    let summary = result?;
    for (name, state) in summary.iter() {
        info!("{}: {:?}", name, state);
    }

    Ok(())
}

/// Append each extra command, split on whitespace, to every repository's
/// `run_cmds`, after the commands the repository declares itself.
fn append_run_commands(config: &mut Config, commands: &[String]) {
    for command in commands {
        let argv: Vec<String> = command.split_whitespace().map(String::from).collect();
        for repo in &mut config.repositories {
            repo.run_cmds.push(argv.clone());
        }
    }
}
