//! Command implementations for the repo-templater CLI

pub mod render;
pub mod run;
