//! Phase 3: run post-render commands.
//!
//! Concurrency is across repositories; within one repository the commands
//! run strictly in listed order, with the working directory set to that
//! repository's output directory. A failing command fails the run; the
//! cancel flag keeps queued repositories from starting afterwards.

use std::path::Path;
use std::process::Command;

use log::info;
use rayon::prelude::*;

use super::{CancelFlag, RunOptions};
use crate::config::RepositoryConfig;
use crate::error::{Error, Result};

pub fn execute(
    repositories: &[&RepositoryConfig],
    options: &RunOptions,
    cancel: &CancelFlag,
) -> Result<()> {
    repositories.par_iter().try_for_each(|repo| {
        if cancel.is_cancelled() {
            return Ok(());
        }

        let dir = options.output_dir.join(&repo.name);

        for argv in &repo.run_cmds {
            if cancel.is_cancelled() {
                return Ok(());
            }
            run_command(&dir, argv, &repo.name).map_err(|e| {
                cancel.cancel();
                e
            })?;
        }

        Ok(())
    })
}

fn run_command(dir: &Path, argv: &[String], repository: &str) -> Result<()> {
    let (program, args) = argv.split_first().ok_or_else(|| Error::Process {
        repository: repository.to_string(),
        command: String::new(),
        message: "empty command".to_string(),
    })?;

    info!("running {:?} in {}", argv, dir.display());

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| Error::Process {
            repository: repository.to_string(),
            command: argv.join(" "),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::Process {
            repository: repository.to_string(),
            command: argv.join(" "),
            message: status.to_string(),
        });
    }

    Ok(())
}
