//! # Configuration Model and Parsing
//!
//! Defines the data structures decoded from `.repo-templater.toml` and the
//! validation applied to them. The model carries no behavior beyond data;
//! variable resolution lives in [`crate::resolve`].
//!
//! A configuration looks like:
//!
//! ```toml
//! [common_variables]
//! team = "platform"
//!
//! [[repositories]]
//! name = "svc"
//! human_name = "Service"
//! url = "git@example.com:org/svc.git"
//! templates = ["base", "rust"]
//!
//! [repositories.variables]
//! owner = "{{ common_variables.team }}"
//! ```
//!
//! Values in `variables` (and the identity fields themselves) may contain
//! template expressions that reference other variables, the identity fields,
//! `common_variables`, or other repositories. They stay raw until
//! [`crate::resolve::resolve`] replaces them with concrete strings.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file, looked up in the config directory.
pub const CONFIG_FILE: &str = ".repo-templater.toml";

/// Name of the directory holding template trees, next to the config file.
pub const TEMPLATES_DIR: &str = ".repo-templates";

/// One managed repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Short identifier; used as the clone directory name and exposed as the
    /// `name` template variable. Must be non-empty, unique, and safe as a
    /// single path segment.
    pub name: String,

    /// Display name; template variable only.
    #[serde(default)]
    pub human_name: String,

    /// Clone source; template variable and clone argument.
    pub url: String,

    /// Template-tree names applied in listed order. Later trees overwrite
    /// earlier trees at the same relative path.
    #[serde(default)]
    pub templates: Vec<String>,

    /// Variable name -> raw value. Values may contain template expressions.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Post-render commands (argv token sequences), run in listed order
    /// inside the rendered repository directory.
    #[serde(default)]
    pub run_cmds: Vec<Vec<String>>,
}

/// The whole batch: repositories plus config-wide variable defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,

    /// Defaults seeded into every repository that does not already define
    /// the name. Repository-local values always win.
    #[serde(default)]
    pub common_variables: BTreeMap<String, String>,
}

impl Config {
    /// Look up a repository by name.
    pub fn repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repositories.iter().find(|r| r.name == name)
    }

    /// Validate identity invariants: every repository name is non-empty,
    /// unique, and usable as a single filesystem path segment.
    ///
    /// Called after resolution, since names may be templated before it.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for repo in &self.repositories {
            if repo.name.is_empty() {
                return Err(Error::ConfigParse {
                    message: format!("repository with url {:?} has an empty name", repo.url),
                    hint: Some("every [[repositories]] entry needs a name".to_string()),
                });
            }

            if repo.name.contains(['/', '\\']) || repo.name == "." || repo.name == ".." {
                return Err(Error::ConfigParse {
                    message: format!(
                        "repository name {:?} is not a valid path segment",
                        repo.name
                    ),
                    hint: None,
                });
            }

            if !seen.insert(repo.name.as_str()) {
                return Err(Error::ConfigParse {
                    message: format!("duplicate repository name {:?}", repo.name),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Load a configuration from a TOML file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: Some(format!("expected a {} file in the config directory", CONFIG_FILE)),
    })?;
    parse(&content)
}

/// Parse a configuration from a TOML string.
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str) -> RepositoryConfig {
        RepositoryConfig {
            name: name.to_string(),
            url: format!("git@example.com:org/{}.git", name),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [common_variables]
            team = "platform"
            ci = "github"

            [[repositories]]
            name = "svc"
            human_name = "Service"
            url = "git@example.com:org/svc.git"
            templates = ["base", "rust"]
            run_cmds = [["gofmt", "-w", "."], ["true"]]

            [repositories.variables]
            owner = "{{ common_variables.team }}"

            [[repositories]]
            name = "lib"
            url = "git@example.com:org/lib.git"
        "#;

        let config = parse(toml).unwrap();
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.common_variables["team"], "platform");

        let svc = &config.repositories[0];
        assert_eq!(svc.name, "svc");
        assert_eq!(svc.human_name, "Service");
        assert_eq!(svc.templates, vec!["base", "rust"]);
        assert_eq!(svc.run_cmds[0], vec!["gofmt", "-w", "."]);
        assert_eq!(svc.variables["owner"], "{{ common_variables.team }}");

        let lib = &config.repositories[1];
        assert_eq!(lib.human_name, "");
        assert!(lib.templates.is_empty());
        assert!(lib.run_cmds.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse("repositories = [ { name = ");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = from_file(Path::new("/nonexistent/.repo-templater.toml"));
        match result {
            Err(Error::ConfigParse { message, .. }) => assert!(message.contains("cannot read")),
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_unique_names() {
        let config = Config {
            repositories: vec![repo("a"), repo("b")],
            common_variables: BTreeMap::new(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let config = Config {
            repositories: vec![repo("")],
            common_variables: BTreeMap::new(),
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("empty name"));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let config = Config {
            repositories: vec![repo("a"), repo("a")],
            common_variables: BTreeMap::new(),
        };
        let err = config.validate().unwrap_err();
        assert!(format!("{}", err).contains("duplicate"));
    }

    #[test]
    fn test_validate_rejects_path_separators() {
        for bad in ["a/b", "a\\b", ".", ".."] {
            let config = Config {
                repositories: vec![repo(bad)],
                common_variables: BTreeMap::new(),
            };
            assert!(config.validate().is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_repository_lookup() {
        let config = Config {
            repositories: vec![repo("a"), repo("b")],
            common_variables: BTreeMap::new(),
        };
        assert_eq!(config.repository("b").unwrap().name, "b");
        assert!(config.repository("c").is_none());
    }
}
