//! Render command implementation
//!
//! Resolves the configuration and renders every selected repository's
//! templates into an output directory, without cloning, committing or
//! pushing. Useful for inspecting what a run would produce and for testing
//! template trees.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use log::info;

use repo_templater::config::{self, TEMPLATES_DIR};
use repo_templater::phases::Selection;
use repo_templater::render;
use repo_templater::resolve;

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory containing the config file and template trees
    #[arg(long, value_name = "PATH", default_value = ".", env = "REPO_TEMPLATER_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Directory to render into (one subdirectory per repository)
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Limit rendering to one repository
    #[arg(long, value_name = "NAME")]
    pub repository: Option<String>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    let config_path = args.config_dir.join(config::CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!("configuration file not found: {}", config_path.display());
    }

    let config = config::from_file(&config_path)?;
    let config = resolve::resolve(config)?;

    let selection = match &args.repository {
        Some(name) => Selection::Only(name.clone()),
        None => Selection::All,
    };
    let repositories = selection.apply(&config)?;

    let templates_root = args.config_dir.join(TEMPLATES_DIR);
    for repo in &repositories {
        info!("rendering {} into {}", repo.name, args.output.display());
        render::render_all(repo, &config, &templates_root, &args.output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_render_command_end_to_end() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join(config::CONFIG_FILE),
            r#"
                [common_variables]
                team = "platform"

                [[repositories]]
                name = "svc"
                human_name = "Service"
                url = "git@example.com:org/svc.git"
                templates = ["base"]

                [repositories.variables]
                owner = "{{ common_variables.team }}"
            "#,
        )
        .unwrap();
        let tree = temp.path().join(TEMPLATES_DIR).join("base");
        fs::create_dir_all(&tree).unwrap();
        fs::write(tree.join("OWNERS"), "{{ variables.owner }}\n").unwrap();

        let output = temp.path().join("out");
        execute(RenderArgs {
            config_dir: temp.path().to_path_buf(),
            output: output.clone(),
            repository: None,
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(output.join("svc/OWNERS")).unwrap(),
            "platform\n"
        );
    }

    #[test]
    fn test_render_command_unknown_repository() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join(config::CONFIG_FILE),
            "[[repositories]]\nname = \"svc\"\nurl = \"git@example.com:org/svc.git\"\n",
        )
        .unwrap();

        let result = execute(RenderArgs {
            config_dir: temp.path().to_path_buf(),
            output: temp.path().join("out"),
            repository: Some("ghost".to_string()),
        });
        assert!(result.unwrap_err().to_string().contains("ghost"));
    }
}
