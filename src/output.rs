//! User-facing messages on stderr
//!
//! Kept apart from `log` so the user sees plain colored text rather than
//! timestamps and module paths. Prompts go to stdout through the prompter.

use owo_colors::OwoColorize;

/// Display an error message to the user in red with padding
///
/// # Example
/// ```ignore
/// output::error("Error: no forms selected for Charizard");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

/// Display a success message in green
pub fn info(message: &str) {
    eprintln!("{}", message.green());
}
