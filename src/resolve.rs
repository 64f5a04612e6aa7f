//! # Variable Resolution Engine
//!
//! Turns the raw configuration into a fully resolved one: after
//! [`resolve`] succeeds, no variable value and no identity field on any
//! repository contains a template expression.
//!
//! The algorithm is a fixed-point iteration per repository:
//!
//! 1. Seed the repository's variables with `common_variables` entries it
//!    does not define itself (repository-local values win).
//! 2. Treat the three identity fields plus every variable value as
//!    resolution candidates.
//! 3. Repeatedly attempt to render each candidate that still contains an
//!    expression against the current snapshot. A successful render replaces
//!    the raw value and restarts the pass, so the new value is immediately
//!    visible to every later attempt. A failed render (or a render whose
//!    output still contains an expression) means "not ready yet" and is
//!    non-fatal.
//! 4. A full pass that advances nothing while candidates remain is stuck
//!    and fails with [`Error::ResolutionStuck`]. Circular references always
//!    end up here; they never loop forever, because every restart is paid
//!    for by one permanently resolved candidate.
//!
//! Repositories are resolved to completion one at a time, in declaration
//! order. Cross-repository references observe whatever state that ordering
//! produces; authored templates must not rely on it.

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::template::{context_for, has_expression, render_str};

/// One resolution candidate on a repository.
#[derive(Debug, Clone)]
enum Slot {
    Name,
    HumanName,
    Url,
    Var(String),
}

/// Resolve every repository in the config, returning a new fully resolved
/// value. The input is consumed; callers never observe a half-resolved
/// snapshot.
pub fn resolve(mut config: Config) -> Result<Config> {
    seed_common_variables(&mut config);

    for idx in 0..config.repositories.len() {
        resolve_repository(&mut config, idx)?;
    }

    // Names may have been templated; identity invariants hold only now.
    config.validate()?;

    Ok(config)
}

/// Copy each common variable into every repository that does not already
/// define it. First writer wins; there is no override.
fn seed_common_variables(config: &mut Config) {
    let common = config.common_variables.clone();
    for repo in &mut config.repositories {
        for (key, value) in &common {
            repo.variables
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }
}

fn resolve_repository(config: &mut Config, idx: usize) -> Result<()> {
    let mut slots = vec![Slot::Name, Slot::HumanName, Slot::Url];
    slots.extend(
        config.repositories[idx]
            .variables
            .keys()
            .cloned()
            .map(Slot::Var),
    );

    'pass: loop {
        let mut remaining = 0;

        for slot in &slots {
            let raw = slot_value(config, idx, slot).to_string();
            if !has_expression(&raw) {
                continue;
            }
            remaining += 1;

            let ctx = context_for(&config.repositories[idx], config);
            match render_str(&raw, &ctx) {
                // An output that still contains an expression means the
                // render pulled in another raw value; retry later.
                Ok(rendered) if !has_expression(&rendered) => {
                    debug!(
                        "resolved {:?} for {}: {:?}",
                        slot, config.repositories[idx].name, rendered
                    );
                    set_slot_value(config, idx, slot, rendered);
                    // Restart with a fresh snapshot so the new value is
                    // visible to every remaining candidate.
                    continue 'pass;
                }
                Ok(_) | Err(_) => {}
            }
        }

        // Full pass completed without a single resolution.
        if remaining == 0 {
            return Ok(());
        }
        return Err(Error::ResolutionStuck {
            repository: config.repositories[idx].name.clone(),
            remaining,
        });
    }
}

fn slot_value<'a>(config: &'a Config, idx: usize, slot: &Slot) -> &'a str {
    let repo = &config.repositories[idx];
    match slot {
        Slot::Name => &repo.name,
        Slot::HumanName => &repo.human_name,
        Slot::Url => &repo.url,
        Slot::Var(key) => repo
            .variables
            .get(key)
            .map(String::as_str)
            .unwrap_or_default(),
    }
}

fn set_slot_value(config: &mut Config, idx: usize, slot: &Slot, value: String) {
    let repo = &mut config.repositories[idx];
    match slot {
        Slot::Name => repo.name = value,
        Slot::HumanName => repo.human_name = value,
        Slot::Url => repo.url = value,
        Slot::Var(key) => {
            repo.variables.insert(key.clone(), value);
        }
    }
}
