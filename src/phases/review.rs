//! Phase 4: stage, show the diff, and commit with confirmation.
//!
//! Strictly sequential so diff output and prompts don't interleave. For
//! each repository: stage everything, print the staged diff, then decide:
//!
//! - no staged changes: log "doesn't need update" and skip
//! - changes but push disabled (dry run): skip the commit
//! - changes and push enabled: ask the operator; decline skips, accept
//!   commits and enters the repository into the push set
//!
//! The diff is always shown before anything destructive, so the operator
//! reviews the real changes before confirming.

use console::style;
use log::info;

use super::{RepoState, RunOptions, RunSummary};
use crate::config::RepositoryConfig;
use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::prompt::Confirmation;

/// Returns the names of the committed repositories, in review order.
pub fn execute(
    repositories: &[&RepositoryConfig],
    git: &dyn GitOperations,
    confirm: &mut dyn Confirmation,
    options: &RunOptions,
    summary: &mut RunSummary,
) -> Result<Vec<String>> {
    let mut to_push = Vec::new();

    for repo in repositories {
        let dir = options.output_dir.join(&repo.name);

        git.add_all(&dir)
            .map_err(|e| Error::for_repository("stage changes in", &repo.name, e))?;

        println!();
        println!("{}", style(format!("Diff for repository {}", repo.name)).bold());
        git.show_staged_diff(&dir)
            .map_err(|e| Error::for_repository("show diff for", &repo.name, e))?;

        let has_changes = git
            .has_changes(&dir)
            .map_err(|e| Error::for_repository("check for changes in", &repo.name, e))?;

        if !has_changes {
            info!("{} doesn't need update", repo.name);
            summary.set(&repo.name, RepoState::Skipped);
            continue;
        }

        if !options.push {
            info!("dry run, skipping commit for {}", repo.name);
            summary.set(&repo.name, RepoState::Skipped);
            continue;
        }

        let message = format!("do you want to commit these changes to {}?", repo.name);
        if !confirm.confirm(&message)? {
            summary.set(&repo.name, RepoState::Skipped);
            continue;
        }

        git.commit(&dir, &options.commit_message)
            .map_err(|e| Error::for_repository("commit changes in", &repo.name, e))?;

        summary.set(&repo.name, RepoState::Committed);
        to_push.push(repo.name.clone());
    }

    Ok(to_push)
}
