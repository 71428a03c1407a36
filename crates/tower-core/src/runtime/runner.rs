//! External command execution
//!
//! Install commands either take over the terminal (interactive scaffolders such as
//! `create-next-app`) or have their output streamed back indented under the prompt.
//! There is no timeout: a hung command hangs the tool.

use crate::error::{Error, Result};
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// One argv invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    /// Hand the terminal to the child instead of streaming its output
    pub inherit_output: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            inherit_output: false,
        }
    }

    /// Split a catalog command line on whitespace. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            args: parts.map(str::to_string).collect(),
            ..Self::new(program)
        })
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn inherit_output(mut self) -> Self {
        self.inherit_output = true;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Port for running external commands
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion. Non-zero exit or failure to start is [`Error::Process`].
    async fn run(&self, command: &CommandSpec) -> Result<()>;
}

/// [`CommandRunner`] that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<()> {
        println!();
        println!("{} {}", "Running:".dimmed(), command.to_string().yellow());
        println!();

        let mut cmd = TokioCommand::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!(command = %command, cwd = ?command.current_dir, "spawning");

        let status = if command.inherit_output {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await
                .map_err(|e| spawn_error(command, e))?
        } else {
            stream(command, &mut cmd).await?
        };

        println!();
        check_status(command, status)
    }
}

async fn stream(command: &CommandSpec, cmd: &mut TokioCommand) -> Result<ExitStatus> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(command, e))?;

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(Error::Process {
            command: command.to_string(),
            reason: "did not expose its output".to_string(),
        });
    };

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }

    child.wait().await.map_err(|e| Error::Process {
        command: command.to_string(),
        reason: format!("could not be waited on: {}", e),
    })
}

fn spawn_error(command: &CommandSpec, e: std::io::Error) -> Error {
    Error::Process {
        command: command.to_string(),
        reason: format!("could not start: {}", e),
    }
}

fn check_status(command: &CommandSpec, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::Process {
            command: command.to_string(),
            reason: match status.code() {
                Some(code) => format!("failed with exit code {}", code),
                None => "was terminated by a signal".to_string(),
            },
        })
    }
}
