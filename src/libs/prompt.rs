//! Cooperative confirmation before destructive store operations.
//!
//! When stdin is a terminal the user is asked with a `dialoguer` prompt.
//! Without a terminal nothing is asked and the operation is refused, so
//! scripted runs never overwrite or delete entries unless forced.

use crate::libs::error::{Result, TimesheetError};
use crate::libs::messages::Message;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::{stdin, IsTerminal};

pub fn is_interactive() -> bool {
    stdin().is_terminal()
}

/// Returns whether the user agreed; always `false` when not interactive.
pub fn confirm(message: Message) -> Result<bool> {
    if !is_interactive() {
        tracing::debug!(prompt = %message, "non-interactive session, refusing without asking");
        return Ok(false);
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message.to_string())
        .default(false)
        .interact()
        .map_err(|e| TimesheetError::Io {
            path: "<terminal>".to_string(),
            source: std::io::Error::other(e.to_string()),
        })
}
