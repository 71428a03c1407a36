//! Charm-style CLI prompts using cliclack

use crate::error::{Error, Result};
use crate::flow::{Choice, Prompter};
use std::io;

/// [`Prompter`] that renders inline cliclack prompts on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

/// cliclack reports Esc and Ctrl+C as `Interrupted`
fn answered<T>(result: io::Result<T>) -> Result<T> {
    result.map_err(|e| match e.kind() {
        io::ErrorKind::Interrupted => Error::Cancelled,
        _ => Error::Prompt(e),
    })
}

impl Prompter for ClackPrompter {
    fn intro(&mut self, title: &str) -> Result<()> {
        answered(cliclack::intro(title))
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        let mut select = cliclack::select(message);
        for choice in choices {
            select = select.item(choice.value.clone(), &choice.label, &choice.hint);
        }
        answered(select.interact())
    }

    fn multiselect(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>> {
        let mut multi = cliclack::multiselect(message);
        for choice in choices {
            multi = multi.item(choice.value.clone(), &choice.label, &choice.hint);
        }
        answered(multi.required(true).interact())
    }

    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool> {
        answered(cliclack::confirm(message).initial_value(initial).interact())
    }

    fn text(
        &mut self,
        message: &str,
        placeholder: &str,
        validate: fn(&str) -> Option<String>,
    ) -> Result<String> {
        answered(
            cliclack::input(message)
                .placeholder(placeholder)
                .validate(move |input: &String| match validate(input) {
                    Some(problem) => Err(problem),
                    None => Ok(()),
                })
                .interact(),
        )
    }

    fn info(&mut self, message: &str) -> Result<()> {
        answered(cliclack::log::info(message))
    }

    fn success(&mut self, message: &str) -> Result<()> {
        answered(cliclack::log::success(message))
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        answered(cliclack::log::warning(message))
    }

    fn error(&mut self, message: &str) -> Result<()> {
        answered(cliclack::log::error(message))
    }

    fn outro(&mut self, message: &str) -> Result<()> {
        answered(cliclack::outro(message))
    }

    fn cancelled(&mut self, message: &str) -> Result<()> {
        answered(cliclack::outro_cancel(message))
    }

    fn failed(&mut self, message: &str) -> Result<()> {
        answered(cliclack::outro_cancel(message))
    }
}
