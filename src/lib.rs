//! # repo-templater Library
//!
//! Core functionality for keeping many independent repositories in sync with
//! a shared set of boilerplate files described by reusable file-tree
//! templates. It is designed to be used by the `repo-templater` command-line
//! tool but can also be embedded by applications that drive their own batch
//! policy (e.g. collect per-repository errors instead of failing fast).
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the `.repo-templater.toml` data model:
//!   repositories, their templates and variables, and config-wide defaults.
//! - **Variable Resolution (`resolve`)**: a fixed-point engine that turns
//!   raw, cross-referencing configuration values into concrete strings, or
//!   fails visibly when the reference graph is stuck.
//! - **Template Rendering (`template`, `render`)**: Tera-based rendering of
//!   whole template trees into repository working copies, preserving
//!   directory structure and permission bits.
//! - **Pipeline Phases (`phases`)**: clone → render → post-commands →
//!   review/commit → push, with parallel clone and command phases separated
//!   by barriers, orchestrated by `phases::orchestrator`.
//! - **Collaborators (`git`, `prompt`)**: trait-backed seams around the
//!   system git command and the operator confirmation prompt, mockable in
//!   tests.
//!
//! ## Execution Flow
//!
//! 1. Decode `.repo-templater.toml` into a [`config::Config`].
//! 2. Resolve every variable and identity field with [`resolve::resolve`].
//! 3. Hand the resolved config to [`phases::orchestrator::execute_run`],
//!    which clones the selected repositories, renders their templates, runs
//!    post-commands, shows each staged diff, and commits/pushes with
//!    operator confirmation.

pub mod config;
pub mod error;
pub mod git;
pub mod phases;
pub mod prompt;
pub mod render;
pub mod resolve;
pub mod template;
