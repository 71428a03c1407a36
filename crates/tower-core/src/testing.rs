//! Test doubles for the prompt and process ports

use crate::error::{Error, Result};
use crate::flow::{Choice, Prompter};
use crate::runtime::{CommandRunner, CommandSpec};
use std::cell::RefCell;
use std::collections::VecDeque;

/// A scripted answer to the next prompt
#[derive(Debug, Clone)]
pub enum Answer {
    Select(&'static str),
    Multi(Vec<&'static str>),
    Confirm(bool),
    Text(&'static str),
    Cancel,
}

/// Prompter that replays answers in order and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Prompt messages, in order
    pub asked: Vec<String>,
    /// Log lines as `level: message`
    pub log: Vec<String>,
    /// Choices offered by the most recent select or multiselect
    pub last_choices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn logged(&self, level: &str) -> Vec<&str> {
        let prefix = format!("{}: ", level);
        self.log
            .iter()
            .filter_map(|line| line.strip_prefix(prefix.as_str()))
            .collect()
    }

    fn next(&mut self, message: &str) -> Answer {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt '{}'", message))
    }

    fn show(&mut self, choices: &[Choice]) {
        self.last_choices = choices.iter().map(|c| c.value.clone()).collect();
    }

    fn offer(&self, value: &str) {
        assert!(
            self.last_choices.iter().any(|c| c == value),
            "'{}' is not among the offered choices {:?}",
            value,
            self.last_choices
        );
    }

    fn push_log(&mut self, level: &str, message: &str) -> Result<()> {
        self.log.push(format!("{}: {}", level, message));
        Ok(())
    }
}

impl Prompter for ScriptedPrompter {
    fn intro(&mut self, title: &str) -> Result<()> {
        self.push_log("intro", title)
    }

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        self.show(choices);
        match self.next(message) {
            Answer::Select(value) => {
                self.offer(value);
                Ok(value.to_string())
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("prompt '{}' is a select, scripted {:?}", message, other),
        }
    }

    fn multiselect(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>> {
        self.show(choices);
        match self.next(message) {
            Answer::Multi(values) => {
                for value in &values {
                    self.offer(value);
                }
                Ok(values.into_iter().map(str::to_string).collect())
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("prompt '{}' is a multiselect, scripted {:?}", message, other),
        }
    }

    fn confirm(&mut self, message: &str, _initial: bool) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(value) => Ok(value),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("prompt '{}' is a confirm, scripted {:?}", message, other),
        }
    }

    fn text(
        &mut self,
        message: &str,
        _placeholder: &str,
        validate: fn(&str) -> Option<String>,
    ) -> Result<String> {
        match self.next(message) {
            Answer::Text(value) => {
                if let Some(problem) = validate(value) {
                    panic!("scripted text '{}' rejected: {}", value, problem);
                }
                Ok(value.to_string())
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("prompt '{}' is a text input, scripted {:?}", message, other),
        }
    }

    fn info(&mut self, message: &str) -> Result<()> {
        self.push_log("info", message)
    }

    fn success(&mut self, message: &str) -> Result<()> {
        self.push_log("success", message)
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.push_log("warning", message)
    }

    fn error(&mut self, message: &str) -> Result<()> {
        self.push_log("error", message)
    }

    fn outro(&mut self, message: &str) -> Result<()> {
        self.push_log("outro", message)
    }

    fn cancelled(&mut self, message: &str) -> Result<()> {
        self.push_log("cancelled", message)
    }

    fn failed(&mut self, message: &str) -> Result<()> {
        self.push_log("failed", message)
    }
}

/// Runner that records commands instead of spawning them
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CommandSpec>>,
    fail_on: Option<String>,
    required_file: Option<String>,
}

impl RecordingRunner {
    /// Fail any command whose command line contains `needle`
    pub fn failing_on(needle: &str) -> Self {
        Self {
            fail_on: Some(needle.to_string()),
            ..Self::default()
        }
    }

    /// Fail any command whose working directory lacks `file_name`, the way
    /// `docker compose` fails without a compose file
    pub fn requiring_file(file_name: &str) -> Self {
        Self {
            required_file: Some(file_name.to_string()),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<()> {
        self.commands.borrow_mut().push(command.clone());
        let failed = match (&self.fail_on, &self.required_file) {
            (Some(needle), _) => command.to_string().contains(needle.as_str()),
            (None, Some(file_name)) => !command
                .current_dir
                .as_ref()
                .is_some_and(|dir| dir.join(file_name).exists()),
            (None, None) => false,
        };
        if failed {
            Err(Error::Process {
                command: command.to_string(),
                reason: "failed with exit code 1".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
