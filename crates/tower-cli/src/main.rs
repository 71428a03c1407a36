//! tower CLI - Scaffold new projects and add tools to existing ones

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_core::catalog::version;
use tower_core::{
    run_project, run_snacks, Catalog, ClackPrompter, LocalFs, Outcome, ProcessRunner,
    ProductConfig, Prompter, Session,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// tower product configuration
#[derive(Clone)]
pub struct TowerConfig;

impl ProductConfig for TowerConfig {
    fn name(&self) -> &'static str {
        "tower"
    }

    fn display_name(&self) -> &'static str {
        "Tower"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install tower-cli --force"
    }
}

#[derive(Parser, Debug)]
#[command(name = "tower")]
#[command(about = "Scaffold new projects and add tools to existing ones")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Power,
    /// Add tools and configuration to the project in the current directory
    Snacks,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(command: Command) -> Result<ExitCode> {
    let config = TowerConfig;
    let catalog = Catalog::load(&config).context("Failed to load the catalog")?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    let mut prompter = ClackPrompter;
    if let Some(warning) =
        version::check_compatibility(CLI_VERSION, catalog.version(), config.upgrade_command())
    {
        prompter.warning(&warning)?;
    }

    let runner = ProcessRunner;
    let mut session = Session::new(&catalog, &mut prompter, &runner, &LocalFs, cwd);

    // Flow errors have already been shown to the user and the frame closed
    let finished = match command {
        Command::Power => run_project(&config, &mut session)
            .await
            .map(|outcome| outcome.is_cancelled()),
        Command::Snacks => run_snacks(&config, &mut session).await.map(|outcome| match outcome {
            Outcome::Completed(report) => {
                tracing::debug!(
                    installed = report.installed.len(),
                    failed = report.failed.len(),
                    "snack batch finished"
                );
                false
            }
            Outcome::Cancelled => true,
        }),
    };
    match finished {
        Ok(cancelled) => {
            tracing::debug!(cancelled, "flow finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();
    let args = Args::parse();

    let result = run(args.command).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
