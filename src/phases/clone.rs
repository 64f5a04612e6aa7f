//! Phase 1: clone every selected repository in parallel.
//!
//! Clones run concurrently across repositories via rayon. The cancel flag
//! is checked before each clone starts, so the first failure stops further
//! clones from being scheduled; workers already running finish on their
//! own. The phase is a barrier: it returns only after every scheduled
//! worker has finished.

use log::info;
use rayon::prelude::*;

use super::{CancelFlag, RunOptions};
use crate::config::RepositoryConfig;
use crate::error::{Error, Result};
use crate::git::GitOperations;

pub fn execute(
    repositories: &[&RepositoryConfig],
    git: &dyn GitOperations,
    options: &RunOptions,
    cancel: &CancelFlag,
) -> Result<()> {
    repositories.par_iter().try_for_each(|repo| {
        if cancel.is_cancelled() {
            return Ok(());
        }

        info!("cloning {} from {}", repo.name, repo.url);

        git.clone_repository(
            &repo.url,
            &repo.name,
            options.branch.as_deref(),
            &options.input_dir,
        )
        .map_err(|e| {
            cancel.cancel();
            Error::for_repository("clone", &repo.name, e)
        })
    })
}
