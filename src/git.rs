//! # Git Collaborator
//!
//! Process-level git operations used by the review and push phases. Every
//! operation is "run argv in a directory, inherit stdout/stderr, fail on
//! non-zero exit"; authentication, credential helpers and SSH keys are the
//! system git's business, not ours.
//!
//! The operations sit behind the [`GitOperations`] trait so the pipeline
//! phases can be tested against a mock without touching a real repository.

use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Git operations needed by the pipeline. Implemented by [`SystemGit`] for
/// real runs and by mocks in tests.
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `parent_dir/directory`. When `branch` is given the
    /// clone is restricted to that single branch; otherwise the remote's
    /// default branch is used.
    fn clone_repository(
        &self,
        url: &str,
        directory: &str,
        branch: Option<&str>,
        parent_dir: &Path,
    ) -> Result<()>;

    /// Stage every change in the working tree.
    fn add_all(&self, dir: &Path) -> Result<()>;

    /// Print the staged diff to the operator's terminal.
    fn show_staged_diff(&self, dir: &Path) -> Result<()>;

    /// Whether the working tree has any uncommitted changes.
    fn has_changes(&self, dir: &Path) -> Result<bool>;

    /// Commit staged changes with the given message.
    fn commit(&self, dir: &Path, message: &str) -> Result<()>;

    /// Push the current branch to its remote.
    fn push(&self, dir: &Path) -> Result<()>;
}

/// [`GitOperations`] backed by the system `git` command.
pub struct SystemGit;

fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    debug!("running git {:?} in {}", args, dir.display());

    let status = Command::new("git").args(args).current_dir(dir).status()?;

    if !status.success() {
        return Err(Error::GitCommand {
            command: format!("git {}", args.join(" ")),
            directory: dir.display().to_string(),
            status: status.to_string(),
        });
    }

    Ok(())
}

impl GitOperations for SystemGit {
    fn clone_repository(
        &self,
        url: &str,
        directory: &str,
        branch: Option<&str>,
        parent_dir: &Path,
    ) -> Result<()> {
        let mut args = vec!["clone", url, directory];
        if let Some(branch) = branch {
            args.extend(["--single-branch", "--branch", branch]);
        }
        run_git(parent_dir, &args)
    }

    fn add_all(&self, dir: &Path) -> Result<()> {
        run_git(dir, &["add", "."])
    }

    fn show_staged_diff(&self, dir: &Path) -> Result<()> {
        run_git(dir, &["--no-pager", "diff", "--cached"])
    }

    fn has_changes(&self, dir: &Path) -> Result<bool> {
        let output = Command::new("git")
            .args(["status", "--porcelain"])
            .current_dir(dir)
            .stderr(Stdio::inherit())
            .output()?;

        if !output.status.success() {
            return Err(Error::GitCommand {
                command: "git status --porcelain".to_string(),
                directory: dir.display().to_string(),
                status: output.status.to_string(),
            });
        }

        Ok(!output.stdout.is_empty())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        run_git(dir, &["commit", "-m", message])
    }

    fn push(&self, dir: &Path) -> Result<()> {
        run_git(dir, &["push"])
    }
}
