//! # Template Engine Wrapper
//!
//! Thin layer over `tera` used by both variable resolution and file
//! rendering. Templates see the same context everywhere:
//!
//! - `name`, `human_name`, `url`: the repository's identity fields
//! - `variables`: the repository's variable map
//! - `common_variables`: the config-wide defaults
//! - `repositories`: map of repository name to repository, for
//!   cross-repository templates (e.g. `{{ repositories.gateway.url }}`)
//!
//! A reference to a name absent from the context fails the render; there is
//! no silent blank substitution. Resolution relies on that failure to decide
//! whether a value is ready.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use tera::{Context, Tera};

use crate::config::{Config, RepositoryConfig};
use crate::error::{Error, Result};

/// Structural check for the presence of a template expression.
///
/// This is a delimiter-pair check, not a parse: it tolerates expressions
/// split across resolution steps.
pub fn has_expression(s: &str) -> bool {
    s.contains("{{") && s.contains("}}")
}

/// Build the render context for one repository.
pub fn context_for(repo: &RepositoryConfig, config: &Config) -> Context {
    let mut ctx = Context::new();
    ctx.insert("name", &repo.name);
    ctx.insert("human_name", &repo.human_name);
    ctx.insert("url", &repo.url);
    ctx.insert("variables", &repo.variables);
    ctx.insert("common_variables", &config.common_variables);

    let repositories: BTreeMap<&str, &RepositoryConfig> = config
        .repositories
        .iter()
        .map(|r| (r.name.as_str(), r))
        .collect();
    ctx.insert("repositories", &repositories);

    ctx
}

/// Render a template string against a context.
///
/// Fails if the template is syntactically invalid or references a name not
/// present in the context.
pub fn render_str(template: &str, ctx: &Context) -> Result<String> {
    Tera::one_off(template, ctx, false).map_err(|e| Error::Template {
        message: error_chain(&e),
    })
}

/// Flatten an error and its sources into one message. Tera's top-level
/// message is usually just "Failed to render", the cause carries the
/// variable name.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
