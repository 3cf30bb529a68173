use std::path::PathBuf;

use crate::error::{Error, Result};

/// Expand a leading `~` in a user supplied path and reject blank values.
pub fn expand_user_path(value: &str, field: &str) -> Result<PathBuf> {
    if value.trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            field,
            format!("--{} cannot be empty", field),
        ));
    }

    Ok(expand_tilde(value))
}

/// Expand a leading `~`. Blank values pass through unchanged.
pub fn expand_tilde(value: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(value).into_owned())
}
