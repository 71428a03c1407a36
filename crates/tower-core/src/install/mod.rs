//! Applying a resolution to a project
//!
//! This module provides:
//! - The append-only commands manifest shared by every snack
//! - Template materialization into per-snack output directories
//! - The aggregated documentation file
//! - [`Installer`], which runs a resolution's commands and records its output

pub mod docs;
pub mod manifest;
pub mod templates;

use crate::catalog::CommandDir;
use crate::error::Result;
use crate::resolver::Resolution;
use crate::runtime::{CommandRunner, CommandSpec, FileStore};
use std::path::{Path, PathBuf};

pub use docs::{render_docs, write_docs};
pub use manifest::{append_commands, ensure_manifest, Appended};
pub use templates::materialize_templates;

/// What applying one resolution produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub section: String,
    pub manifest: Appended,
    pub files: Vec<PathBuf>,
    /// Number of commands that were executed
    pub ran: usize,
    /// Follow-up instructions for the user
    pub notes: Option<String>,
}

/// Applies resolutions to one project directory
pub struct Installer<'a, S, R> {
    store: &'a S,
    runner: &'a R,
    project_dir: PathBuf,
    run_commands: bool,
}

impl<'a, S: FileStore, R: CommandRunner> Installer<'a, S, R> {
    pub fn new(store: &'a S, runner: &'a R, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            runner,
            project_dir: project_dir.into(),
            run_commands: false,
        }
    }

    /// Execute commands in the project directory as well as recording them
    pub fn run_commands(mut self, run: bool) -> Self {
        self.run_commands = run;
        self
    }

    /// Write the template files into `output_dir`, run the commands (when
    /// enabled) with the terminal handed over, then record the commands under
    /// the resolution's section. Stops at the first failing step.
    pub async fn apply(
        &self,
        resolution: &Resolution,
        output_dir: &Path,
        manifest_path: &Path,
    ) -> Result<Applied> {
        let files = materialize_templates(self.store, &resolution.files, output_dir)?;

        let mut ran = 0;
        if self.run_commands {
            let dir = match resolution.cwd {
                CommandDir::Project => self.project_dir.as_path(),
                CommandDir::Output => output_dir,
            };
            for line in &resolution.commands {
                let Some(command) = CommandSpec::parse(line) else {
                    continue;
                };
                // Installers such as `shadcn init` ask questions of their own
                self.runner
                    .run(&command.current_dir(dir).inherit_output())
                    .await?;
                ran += 1;
            }
        }

        let manifest = append_commands(
            self.store,
            manifest_path,
            &resolution.section,
            &resolution.commands,
        )?;

        Ok(Applied {
            section: resolution.section.clone(),
            manifest,
            files,
            ran,
            notes: resolution.notes.clone(),
        })
    }
}
