use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::output;
use crate::errors::CliError;

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Prompt for free-form text. Empty input is allowed; required fields are
/// enforced by the validation engine, not the prompt.
pub fn prompt_text(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, CliError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(current) = initial {
        if !current.is_empty() {
            input = input.with_initial_text(current.to_string());
        }
    }
    Ok(input.interact_text()?)
}

/// Prompt the user to pick one of `options`.
pub fn prompt_select(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[&str],
    default: usize,
) -> Result<usize, CliError> {
    Ok(Select::with_theme(theme)
        .with_prompt(prompt)
        .items(options)
        .default(default)
        .interact()?)
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CliError> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
