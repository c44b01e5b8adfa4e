//! User input and interaction handling.
//!
//! The wizard talks to the terminal through the object-safe [`Prompter`]
//! trait so interactive flows can be exercised in tests with a scripted
//! implementation. [`DialoguerPrompter`] is the real terminal-backed one.

use dialoguer::{Confirm, Input, Select};

use crate::error::{Error, Result};

/// Abstraction over the three interactions the wizard needs.
pub trait Prompter {
    /// Free-text input. An empty reply yields the default when one is set.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Single choice from a closed menu, returns the selected index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt);
        input = match default {
            Some(value) => input.default(value.to_string()),
            None => input.allow_empty(true),
        };
        input.interact_text().map_err(map_dialoguer_error)
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(map_dialoguer_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(map_dialoguer_error)
    }
}

/// Ctrl-C inside a prompt surfaces as an interrupted read; everything
/// else is a terminal/configuration problem.
fn map_dialoguer_error(err: dialoguer::Error) -> Error {
    let dialoguer::Error::IO(io_err) = err;
    if io_err.kind() == std::io::ErrorKind::Interrupted {
        Error::Interrupted
    } else {
        Error::IoError(io_err)
    }
}
