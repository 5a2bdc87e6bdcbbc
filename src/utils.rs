/// Utility functions for user interaction.
use crate::error::Result;
use std::io::{self, Write};

/// Ask before deleting an object. Anything other than `y`/`yes` declines.
pub fn confirm_deletion(object: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }

    print!("Delete {object}? (y/N): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let answer = input.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
