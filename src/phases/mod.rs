//! # Pipeline Phases
//!
//! The run lifecycle is a sequence of phases, each a barrier: phase N+1
//! never starts until every repository has finished phase N. Clone and
//! post-commands run in parallel across repositories (rayon); render,
//! review and push iterate sequentially.
//!
//! ```text
//! clone ─▶ render ─▶ post-commands ─▶ review/commit ─▶ push
//! ```
//!
//! Per repository the states are `Pending → Cloned → Rendered →
//! CommandsRun → {Skipped | Committed} → Pushed`. There is no rollback: a
//! commit followed by a push failure leaves the repository
//! committed-but-unpushed, which is terminal and operator-visible.
//!
//! This module holds the types shared by the phases: run options, the
//! repository selection, the cancel flag passed to parallel workers, and
//! the per-repository state summary.

pub mod clone;
pub mod commands;
pub mod orchestrator;
pub mod push;
pub mod render;
pub mod review;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{Config, RepositoryConfig};
use crate::error::{Error, Result};

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory repositories are cloned into.
    pub input_dir: PathBuf,
    /// Directory templates are rendered into (`<output_dir>/<repo name>`).
    /// For a full run this equals `input_dir`.
    pub output_dir: PathBuf,
    /// Root directory containing the template trees.
    pub templates_root: PathBuf,
    /// Commit message used for every repository.
    pub commit_message: String,
    /// Whether commits and pushes are enabled. `false` is a dry run.
    pub push: bool,
    /// Branch to clone; `None` uses each remote's default branch.
    pub branch: Option<String>,
}

/// Which repositories a run covers.
#[derive(Debug, Clone)]
pub enum Selection {
    /// Every repository in the config.
    All,
    /// A single named repository.
    Only(String),
    /// Every repository except the named ones.
    Skip(Vec<String>),
}

impl Selection {
    /// Resolve the selection against a config. Any referenced name missing
    /// from the config fails immediately, before any phase starts.
    pub fn apply<'a>(&self, config: &'a Config) -> Result<Vec<&'a RepositoryConfig>> {
        match self {
            Selection::All => Ok(config.repositories.iter().collect()),
            Selection::Only(name) => config
                .repository(name)
                .map(|repo| vec![repo])
                .ok_or_else(|| Error::Selection { name: name.clone() }),
            Selection::Skip(names) => {
                for name in names {
                    if config.repository(name).is_none() {
                        return Err(Error::Selection { name: name.clone() });
                    }
                }
                Ok(config
                    .repositories
                    .iter()
                    .filter(|repo| !names.contains(&repo.name))
                    .collect())
            }
        }
    }
}

/// Lifecycle state of one repository across the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Pending,
    Cloned,
    Rendered,
    CommandsRun,
    /// Finished without a commit: no changes, dry run, or declined prompt.
    Skipped,
    /// Committed; terminal when push is disabled or fails afterwards.
    Committed,
    Pushed,
}

/// Per-repository outcome of a run, for reporting at the batch boundary.
#[derive(Debug, Default)]
pub struct RunSummary {
    states: BTreeMap<String, RepoState>,
}

impl RunSummary {
    pub fn set(&mut self, name: &str, state: RepoState) {
        self.states.insert(name.to_string(), state);
    }

    pub fn state(&self, name: &str) -> Option<RepoState> {
        self.states.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, RepoState)> {
        self.states.iter().map(|(name, state)| (name.as_str(), *state))
    }
}

/// Cooperative cancellation for parallel phases. Workers check the flag at
/// each suspension point so one failed external process stops further work
/// from being scheduled instead of hanging the barrier.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Mock collaborators shared by phase tests.

    use std::path::Path;
    use std::sync::Mutex;

    use crate::error::{Error, Result};
    use crate::git::GitOperations;
    use crate::prompt::Confirmation;

    /// Records every git call; behavior is configured per instance.
    #[derive(Default)]
    pub struct MockGit {
        pub calls: Mutex<Vec<String>>,
        /// Repositories (by directory name) that report staged changes.
        pub changed: Vec<String>,
        /// Clone calls fail for URLs containing this marker.
        pub fail_clone_marker: Option<String>,
        /// Push calls fail for directories containing this marker.
        pub fail_push_marker: Option<String>,
    }

    impl MockGit {
        pub fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn dir_name(dir: &Path) -> String {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        }
    }

    impl GitOperations for MockGit {
        fn clone_repository(
            &self,
            url: &str,
            directory: &str,
            branch: Option<&str>,
            _parent_dir: &Path,
        ) -> Result<()> {
            self.record(format!("clone {} {} {:?}", url, directory, branch));
            if let Some(marker) = &self.fail_clone_marker {
                if url.contains(marker.as_str()) {
                    return Err(Error::GitCommand {
                        command: format!("git clone {}", url),
                        directory: directory.to_string(),
                        status: "exit status: 128".to_string(),
                    });
                }
            }
            Ok(())
        }

        fn add_all(&self, dir: &Path) -> Result<()> {
            self.record(format!("add {}", Self::dir_name(dir)));
            Ok(())
        }

        fn show_staged_diff(&self, dir: &Path) -> Result<()> {
            self.record(format!("diff {}", Self::dir_name(dir)));
            Ok(())
        }

        fn has_changes(&self, dir: &Path) -> Result<bool> {
            let name = Self::dir_name(dir);
            self.record(format!("status {}", name));
            Ok(self.changed.contains(&name))
        }

        fn commit(&self, dir: &Path, message: &str) -> Result<()> {
            self.record(format!("commit {} {:?}", Self::dir_name(dir), message));
            Ok(())
        }

        fn push(&self, dir: &Path) -> Result<()> {
            let name = Self::dir_name(dir);
            self.record(format!("push {}", name));
            if let Some(marker) = &self.fail_push_marker {
                if name.contains(marker.as_str()) {
                    return Err(Error::GitCommand {
                        command: "git push".to_string(),
                        directory: name,
                        status: "exit status: 1".to_string(),
                    });
                }
            }
            Ok(())
        }
    }

    /// Prompt that replays a fixed sequence of answers.
    pub struct ScriptedPrompt {
        answers: Vec<bool>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: Vec<bool>) -> Self {
            Self {
                answers,
                asked: Vec::new(),
            }
        }
    }

    impl Confirmation for ScriptedPrompt {
        fn confirm(&mut self, message: &str) -> Result<bool> {
            self.asked.push(message.to_string());
            if self.answers.is_empty() {
                return Err(Error::Prompt {
                    message: "no scripted answer left".to_string(),
                });
            }
            Ok(self.answers.remove(0))
        }
    }
}
