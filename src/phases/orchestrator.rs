//! Drives the complete run: selection, then the five phases with a barrier
//! between each. Variable resolution has already happened by the time this
//! runs, so every worker reads immutable, fully resolved repository
//! snapshots; the only writes during parallel phases go to each worker's
//! own filesystem subtree.

use log::info;

use super::{clone, commands, push, render, review, CancelFlag, RepoState, RunOptions, RunSummary, Selection};
use crate::config::Config;
use crate::error::Result;
use crate::git::GitOperations;
use crate::prompt::Confirmation;

/// Execute the full lifecycle for the selected repositories:
/// clone → render → post-commands → review/commit → push.
///
/// Failure policy is fail-fast: the first error in any phase fails the run
/// after that phase's barrier. The returned summary reports each selected
/// repository's final state.
pub fn execute_run(
    config: &Config,
    selection: &Selection,
    git: &dyn GitOperations,
    confirm: &mut dyn Confirmation,
    options: &RunOptions,
) -> Result<RunSummary> {
    let repositories = selection.apply(config)?;

    let mut summary = RunSummary::default();
    for repo in &repositories {
        summary.set(&repo.name, RepoState::Pending);
    }

    let cancel = CancelFlag::new();

    clone::execute(&repositories, git, options, &cancel)?;
    for repo in &repositories {
        summary.set(&repo.name, RepoState::Cloned);
    }

    render::execute(&repositories, config, options)?;
    for repo in &repositories {
        summary.set(&repo.name, RepoState::Rendered);
    }

    commands::execute(&repositories, options, &cancel)?;
    for repo in &repositories {
        summary.set(&repo.name, RepoState::CommandsRun);
    }

    let committed = review::execute(&repositories, git, confirm, options, &mut summary)?;

    if options.push {
        push::execute(&committed, git, options, &mut summary)?;
    } else {
        info!("dry run, not pushing changes, to push please add --push");
    }

    Ok(summary)
}
