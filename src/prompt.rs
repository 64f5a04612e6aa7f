//! Operator confirmation seam.
//!
//! The review phase asks before committing anything. The prompt is a trait
//! so tests can script answers; the real implementation uses `dialoguer`
//! with a decline default, so anything short of an explicit "y" skips the
//! commit.

use dialoguer::Confirm;

use crate::error::{Error, Result};

/// Yes/no confirmation read from the operator.
pub trait Confirmation {
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Interactive terminal prompt.
pub struct TerminalPrompt;

impl Confirmation for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt {
                message: e.to_string(),
            })
    }
}
