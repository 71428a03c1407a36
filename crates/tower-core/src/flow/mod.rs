//! Interactive flows: project creation and snack batches
//!
//! Flows talk to the user only through a [`Prompter`], run processes only through a
//! [`CommandRunner`], and touch disk only through a [`FileStore`]. A dismissed
//! prompt surfaces as [`Error::Cancelled`] and is turned into
//! [`Outcome::Cancelled`] at the flow boundary. Any other error is reported to
//! the user and the flow is closed before the error is returned.

pub mod project;
pub mod snacks;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::runtime::{CommandRunner, FileStore};
use std::path::PathBuf;

pub use project::{run_project, ProjectPlan, ProjectSummary};
pub use snacks::{run_snacks, BatchReport};

/// One option of a select or multiselect prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub hint: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            hint: hint.into(),
        }
    }
}

/// Prompt provider and user-facing log
///
/// Every prompt returns [`Error::Cancelled`] when the user dismisses it.
pub trait Prompter {
    fn intro(&mut self, title: &str) -> Result<()>;

    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<String>;

    /// At least one value is returned
    fn multiselect(&mut self, message: &str, choices: &[Choice]) -> Result<Vec<String>>;

    fn confirm(&mut self, message: &str, initial: bool) -> Result<bool>;

    /// Free text; `validate` returns an error message for rejected input
    fn text(&mut self, message: &str, placeholder: &str, validate: fn(&str) -> Option<String>)
        -> Result<String>;

    fn info(&mut self, message: &str) -> Result<()>;

    fn success(&mut self, message: &str) -> Result<()>;

    fn warning(&mut self, message: &str) -> Result<()>;

    fn error(&mut self, message: &str) -> Result<()>;

    fn outro(&mut self, message: &str) -> Result<()>;

    /// Closing line for a cancelled flow
    fn cancelled(&mut self, message: &str) -> Result<()>;

    /// Closing line for a flow that stopped on an error
    fn failed(&mut self, message: &str) -> Result<()>;
}

/// Terminal state of a flow that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

/// Everything a flow needs, injected by the caller
pub struct Session<'a, P, R, S> {
    pub catalog: &'a Catalog,
    pub prompter: &'a mut P,
    pub runner: &'a R,
    pub store: &'a S,
    /// Directory the flow operates in
    pub cwd: PathBuf,
}

impl<'a, P: Prompter, R: CommandRunner, S: FileStore> Session<'a, P, R, S> {
    pub fn new(
        catalog: &'a Catalog,
        prompter: &'a mut P,
        runner: &'a R,
        store: &'a S,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            prompter,
            runner,
            store,
            cwd: cwd.into(),
        }
    }
}

/// Convert a flow result into an outcome, closing the prompt session either way
pub(crate) fn finish<T, P: Prompter>(prompter: &mut P, result: Result<T>) -> Result<Outcome<T>> {
    match result {
        Ok(value) => Ok(Outcome::Completed(value)),
        Err(Error::Cancelled) => {
            prompter.cancelled("Operation cancelled")?;
            Ok(Outcome::Cancelled)
        }
        Err(e) => {
            tracing::error!(error = %e, "flow failed");
            let reported = prompter
                .error(&e.to_string())
                .and_then(|()| prompter.failed("Setup failed"));
            if let Err(report_error) = reported {
                tracing::warn!(error = %report_error, "could not report failure");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn test_finish_maps_cancellation() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let outcome: Outcome<()> = finish(&mut prompter, Err(Error::Cancelled)).unwrap();
        assert!(outcome.is_cancelled());
        assert_eq!(prompter.log, vec!["cancelled: Operation cancelled"]);

        let outcome = finish(&mut prompter, Ok(7)).unwrap();
        assert_eq!(outcome, Outcome::Completed(7));

        let err = finish::<(), _>(&mut prompter, Err(Error::PackageManagerNotDetected(".".into())))
            .unwrap_err();
        assert!(matches!(err, Error::PackageManagerNotDetected(_)));
    }

    #[test]
    fn test_finish_reports_and_closes_failures() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let err = finish::<(), _>(
            &mut prompter,
            Err(Error::Process {
                command: "git init".into(),
                reason: "failed with exit code 128".into(),
            }),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Process { .. }));
        assert_eq!(prompter.logged("error"), vec![err.to_string().as_str()]);
        assert_eq!(prompter.log.last().unwrap(), "failed: Setup failed");
    }
}
