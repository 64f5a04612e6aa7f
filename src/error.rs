//! # Error Handling
//!
//! Centralized error type for the `repo-templater` library, built with
//! `thiserror`. Every failure mode the pipeline can hit has its own variant
//! carrying enough context (repository name, offending path, command line) to
//! produce an actionable message at the batch boundary.
//!
//! The binary converts these into `anyhow` errors at the top level; the
//! library itself never panics on an expected failure.

use thiserror::Error;

/// Main error type for repo-templater operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file is missing or structurally invalid.
    ///
    /// Includes an optional hint about how to fix the problem.
    #[error("configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A TOML decoding error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Variable resolution reached a pass with remaining candidates and zero
    /// progress. `remaining` counts the expressions that could not be
    /// advanced.
    #[error("cannot resolve variables for {repository}: {remaining} expression(s) stuck (circular or undefined reference)")]
    ResolutionStuck {
        repository: String,
        remaining: usize,
    },

    /// A template file could not be rendered (undefined variable, invalid
    /// syntax, or non-UTF-8 input).
    #[error("cannot render {path} for {repository}: {message}")]
    Render {
        path: String,
        repository: String,
        message: String,
    },

    /// A template expression failed to evaluate during variable resolution.
    #[error("template error: {message}")]
    Template { message: String },

    /// An external git command exited non-zero.
    #[error("git command failed in {directory}: {command} ({status})")]
    GitCommand {
        command: String,
        directory: String,
        status: String,
    },

    /// A post-render command exited non-zero or could not be started.
    #[error("command {command:?} failed for {repository}: {message}")]
    Process {
        repository: String,
        command: String,
        message: String,
    },

    /// A repository named on the command line does not exist in the config.
    #[error("repository not found in configuration: {name}")]
    Selection { name: String },

    /// The interactive confirmation prompt failed (e.g. closed stdin).
    #[error("prompt error: {message}")]
    Prompt { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lower-level error wrapped with the repository it belongs to.
    #[error("cannot {action} {repository}: {source}")]
    Repository {
        repository: String,
        action: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap an error with "cannot `action` `repository`" context.
    pub fn for_repository(action: &str, repository: &str, source: Error) -> Self {
        Error::Repository {
            repository: repository.to_string(),
            action: action.to_string(),
            source: Box::new(source),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
