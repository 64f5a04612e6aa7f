//! Phase 2: render every selected repository's templates.
//!
//! Sequential across repositories; within one repository the templates are
//! applied in their listed order so later trees can overwrite earlier ones.

use log::info;

use super::RunOptions;
use crate::config::{Config, RepositoryConfig};
use crate::error::Result;
use crate::render;

pub fn execute(
    repositories: &[&RepositoryConfig],
    config: &Config,
    options: &RunOptions,
) -> Result<()> {
    for repo in repositories {
        info!("rendering {} template(s) for {}", repo.templates.len(), repo.name);
        render::render_all(repo, config, &options.templates_root, &options.output_dir)?;
    }
    Ok(())
}
