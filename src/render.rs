//! # Template-Tree Rendering
//!
//! Renders a named template tree into a repository's output directory. A
//! template tree is a directory of text templates under the templates root;
//! every file is rendered against the repository's resolved context and
//! written to `output_root/<repo name>/<relative path>`, preserving the
//! source permission bits. Directories are structural only and are created
//! on demand with the source directory's permissions.
//!
//! Rendering requires a fully resolved repository ([`crate::resolve`] runs
//! first); a file that references an undefined variable fails that file with
//! no partial-output fallback.

use std::fs;
use std::path::Path;

use log::debug;
use tera::Context;
use walkdir::WalkDir;

use crate::config::{Config, RepositoryConfig};
use crate::error::{Error, Result};
use crate::template;

/// Apply every template tree listed on the repository, in order. Later
/// trees overwrite earlier trees at the same relative path; that layering
/// is intentional (base tree plus language overlay).
pub fn render_all(
    repo: &RepositoryConfig,
    config: &Config,
    templates_root: &Path,
    output_root: &Path,
) -> Result<()> {
    for tree in &repo.templates {
        let tree_dir = templates_root.join(tree);
        if !tree_dir.is_dir() {
            return Err(Error::Render {
                path: tree_dir.display().to_string(),
                repository: repo.name.clone(),
                message: format!("template tree {:?} not found", tree),
            });
        }
        render_tree(repo, config, &tree_dir, output_root)?;
    }
    Ok(())
}

/// Render every file under one template tree into the repository directory.
pub fn render_tree(
    repo: &RepositoryConfig,
    config: &Config,
    tree_dir: &Path,
    output_root: &Path,
) -> Result<()> {
    let ctx = template::context_for(repo, config);
    let dest_root = output_root.join(&repo.name);

    for entry in WalkDir::new(tree_dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(tree_dir)
            .expect("walkdir yields paths under its root");
        let dest = dest_root.join(relative);

        render_file(entry.path(), &dest, &ctx, &repo.name)?;
    }

    Ok(())
}

fn render_file(source: &Path, dest: &Path, ctx: &Context, repo_name: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            copy_permissions(source.parent().unwrap_or(Path::new(".")), parent)?;
        }
    }

    let bytes = fs::read(source)?;
    let input = String::from_utf8(bytes).map_err(|_| Error::Render {
        path: source.display().to_string(),
        repository: repo_name.to_string(),
        message: "template file is not valid UTF-8".to_string(),
    })?;

    debug!("rendering {} -> {}", source.display(), dest.display());

    let rendered = match template::render_str(&input, ctx) {
        Ok(rendered) => rendered,
        Err(Error::Template { message }) => {
            return Err(Error::Render {
                path: source.display().to_string(),
                repository: repo_name.to_string(),
                message,
            })
        }
        Err(other) => return Err(other),
    };

    fs::write(dest, rendered)?;
    copy_permissions(source, dest)?;

    Ok(())
}

#[cfg(unix)]
fn copy_permissions(source: &Path, dest: &Path) -> Result<()> {
    let metadata = fs::metadata(source)?;
    fs::set_permissions(dest, metadata.permissions())?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_permissions(_source: &Path, _dest: &Path) -> Result<()> {
    Ok(())
}
