//! Phase 5: push every committed repository.
//!
//! Sequential; a push failure is fatal and names the repository. There is
//! no rollback and no retry: a failed push leaves its repository
//! committed-but-unpushed, a terminal state the operator resolves by hand.

use log::info;

use super::{RepoState, RunOptions, RunSummary};
use crate::error::{Error, Result};
use crate::git::GitOperations;

pub fn execute(
    committed: &[String],
    git: &dyn GitOperations,
    options: &RunOptions,
    summary: &mut RunSummary,
) -> Result<()> {
    for name in committed {
        info!("pushing {}", name);
        git.push(&options.output_dir.join(name))
            .map_err(|e| Error::for_repository("push", name, e))?;
        summary.set(name, RepoState::Pushed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::testing::MockGit;
    use std::path::PathBuf;

    fn options() -> RunOptions {
        RunOptions {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("input"),
            templates_root: PathBuf::from(".repo-templates"),
            commit_message: "update repository template".to_string(),
            push: true,
            branch: None,
        }
    }

    #[test]
    fn test_pushes_every_committed_repository() {
        let git = MockGit::default();
        let mut summary = RunSummary::default();

        execute(
            &["a".to_string(), "b".to_string()],
            &git,
            &options(),
            &mut summary,
        )
        .unwrap();

        assert_eq!(git.calls(), vec!["push a", "push b"]);
        assert_eq!(summary.state("a"), Some(RepoState::Pushed));
        assert_eq!(summary.state("b"), Some(RepoState::Pushed));
    }

    #[test]
    fn test_push_failure_leaves_repository_committed() {
        let git = MockGit {
            fail_push_marker: Some("b".to_string()),
            ..Default::default()
        };
        let mut summary = RunSummary::default();
        summary.set("a", RepoState::Committed);
        summary.set("b", RepoState::Committed);

        let err = execute(
            &["a".to_string(), "b".to_string()],
            &git,
            &options(),
            &mut summary,
        )
        .unwrap_err();

        assert!(format!("{}", err).contains("cannot push b"));
        assert_eq!(summary.state("a"), Some(RepoState::Pushed));
        // Terminal, operator-visible state: committed but not pushed.
        assert_eq!(summary.state("b"), Some(RepoState::Committed));
    }
}
