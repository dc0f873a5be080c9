//! Shared helpers for command handlers.

use dialoguer::Input;

use crate::error::CliError;

/// Use the flag value if given, otherwise ask for it on the terminal.
///
/// `field` is the flag name, used in the error when no terminal is attached.
pub fn value_or_prompt(
    value: Option<String>,
    field: &'static str,
    prompt: &str,
) -> Result<String, CliError> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }
    let answer: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|source| CliError::Prompt { field, source })?;
    Ok(answer.trim().to_owned())
}

/// Numeric variant of [`value_or_prompt`], offering `default`.
pub fn number_or_prompt(
    value: Option<i32>,
    field: &'static str,
    prompt: &str,
    default: i32,
) -> Result<i32, CliError> {
    if let Some(value) = value {
        return Ok(value);
    }
    Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(|source| CliError::Prompt { field, source })
}
