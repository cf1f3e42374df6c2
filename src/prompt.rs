//! Interactive confirmations.

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::error::Result;

/// Asks a yes/no question, defaulting to no. `skip` answers yes without asking.
pub fn confirm(skip: bool, prompt: String) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Whether a user is attached to answer prompts.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}
