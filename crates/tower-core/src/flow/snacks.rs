//! Snack batches: add-ons installed into an existing project
//!
//! The project is checked for its package manager and framework, the user
//! confirms or corrects the framework, picks any number of applicable snacks,
//! and each one is prepared into
//! `<snacks dir>/<snack>`. One snack failing does not stop the others; a
//! cancelled prompt stops the whole batch.

use super::{finish, Choice, Outcome, Prompter, Session};
use crate::catalog::{Bundler, Catalog, Framework, LanguageEntry, SetupStrategy, SnackEntry};
use crate::error::{Error, Result};
use crate::install::{docs, manifest, Applied, Appended, Installer};
use crate::product::ProductConfig;
use crate::resolver::{self, SetupSelector};
use crate::runtime::{CommandRunner, EnvironmentDetector, FileStore};
use std::path::Path;

/// Per-snack results of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub installed: Vec<String>,
    /// Snack name and the reason it failed
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the interactive snack flow in the session's directory
pub async fn run_snacks<C, P, R, S>(
    config: &C,
    session: &mut Session<'_, P, R, S>,
) -> Result<Outcome<BatchReport>>
where
    C: ProductConfig,
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    session
        .prompter
        .intro(&format!("{} snacks - Add tools to your project", config.display_name()))?;

    let result = snack_batch(config, session).await;
    finish(&mut *session.prompter, result)
}

async fn snack_batch<C, P, R, S>(config: &C, session: &mut Session<'_, P, R, S>) -> Result<BatchReport>
where
    C: ProductConfig,
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    let catalog = session.catalog;
    let store = session.store;
    let cwd = session.cwd.clone();
    let prompter = &mut *session.prompter;
    let detector = EnvironmentDetector::new(store, &cwd);

    let package_manager = detector
        .package_manager(catalog)
        .ok_or_else(|| Error::PackageManagerNotDetected(cwd.clone()))?;
    prompter.info(&format!("Detected package manager: {}", package_manager.key))?;

    let language = catalog.language_for_package_manager(&package_manager.key);
    let framework = match language {
        Some(language) if !language.frameworks.is_empty() => {
            confirm_framework(prompter, language, detector.framework(language))?
        }
        _ => None,
    };
    tracing::debug!(
        package_manager = %package_manager.key,
        language = language.map(|l| l.name.as_str()),
        framework = framework.map(|f| f.name.as_str()),
        "detected project"
    );

    let candidates = catalog.snacks_for(
        language.map(|l| l.name.as_str()),
        framework.map(|f| f.name.as_str()),
    );
    if candidates.is_empty() {
        prompter.warning("No snacks available for this project")?;
        prompter.outro("Nothing to do")?;
        return Ok(BatchReport::default());
    }

    let choices: Vec<Choice> = candidates
        .iter()
        .map(|s| Choice::new(&s.name, &s.name, &s.description))
        .collect();
    let selected = prompter.multiselect("Select snacks to add to your project:", &choices)?;
    let run_now = prompter.confirm(
        &format!(
            "Run the install commands now? They are saved to {} either way.",
            config.manifest_file()
        ),
        false,
    )?;

    let snacks_dir = cwd.join(config.snacks_dir());
    store.create_dir_all(&snacks_dir)?;
    let manifest_path = snacks_dir.join(config.manifest_file());
    manifest::ensure_manifest(store, &manifest_path)?;

    let bundler = detector.bundler();
    let installer = Installer::new(store, session.runner, &cwd).run_commands(run_now);
    let target = Target {
        catalog,
        package_manager: &package_manager.key,
        bundler,
        snacks_dir: &snacks_dir,
        manifest_path: &manifest_path,
    };

    let mut report = BatchReport::default();
    for name in &selected {
        match install_snack(prompter, &installer, &target, name).await {
            Ok(applied) => {
                let recorded = match applied.manifest {
                    Appended::Written => format!(", commands saved to {}", config.manifest_file()),
                    Appended::AlreadyPresent => ", commands already recorded".to_string(),
                    Appended::Empty => String::new(),
                };
                prompter.success(&format!(
                    "Prepared {} ({} files{})",
                    name,
                    applied.files.len(),
                    recorded
                ))?;
                if let Some(notes) = &applied.notes {
                    prompter.info(notes.trim())?;
                }
                report.installed.push(name.clone());
            }
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                tracing::warn!(snack = %name, error = %e, "snack failed");
                prompter.error(&format!("Failed to prepare {}: {}", name, e))?;
                report.failed.push((name.clone(), e.to_string()));
            }
        }
    }

    let documented = selected.iter().filter_map(|name| catalog.snack(name).ok());
    let docs_path = snacks_dir.join(config.docs_file());
    if let Err(e) = docs::write_docs(store, &docs_path, documented) {
        prompter.error(&format!("Could not write {}: {}", config.docs_file(), e))?;
    }

    if report.is_clean() {
        prompter.outro("All selected snacks have been prepared!")?;
    } else {
        prompter.outro(&format!(
            "{} prepared, {} failed",
            report.installed.len(),
            report.failed.len()
        ))?;
    }
    Ok(report)
}

/// Detection only suggests the framework; the user has the last word.
/// Picking "none of these" disables framework filtering.
fn confirm_framework<'c, P: Prompter>(
    prompter: &mut P,
    language: &'c LanguageEntry,
    detected: Option<&'c Framework>,
) -> Result<Option<&'c Framework>> {
    let message = match detected {
        Some(framework) => {
            let question = format!("Detected {} project. Is this correct?", framework.name);
            if prompter.confirm(&question, true)? {
                return Ok(Some(framework));
            }
            "What framework are you using?"
        }
        None => "Could not detect a framework. Please select:",
    };

    let mut choices: Vec<Choice> = language
        .frameworks
        .iter()
        .map(|f| Choice::new(&f.name, &f.name, &f.description))
        .collect();
    choices.push(Choice::new("", "None of these", "Offer snacks for any framework"));

    let picked = prompter.select(message, &choices)?;
    Ok(language.frameworks.iter().find(|f| f.name == picked))
}

/// Where and for what a batch installs
struct Target<'a> {
    catalog: &'a Catalog,
    package_manager: &'a str,
    bundler: Bundler,
    snacks_dir: &'a Path,
    manifest_path: &'a Path,
}

async fn install_snack<P, R, S>(
    prompter: &mut P,
    installer: &Installer<'_, S, R>,
    target: &Target<'_>,
    name: &str,
) -> Result<Applied>
where
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    let snack = target.catalog.snack(name)?;
    let tool = snack.tool.as_deref().unwrap_or(target.package_manager);
    let mut output_dir = target.snacks_dir.join(dir_name(&snack.name));

    let chosen;
    let selector = match snack.select {
        SetupStrategy::First => SetupSelector::Named(first_setup(snack)?),
        SetupStrategy::Auto => SetupSelector::Auto,
        SetupStrategy::Bundler => {
            prompter.info(&format!("Detected {}, preparing {}", target.bundler, snack.name))?;
            SetupSelector::Bundler(target.bundler)
        }
        SetupStrategy::Prompt => {
            let choices: Vec<Choice> = snack
                .setup
                .iter()
                .map(|s| Choice::new(&s.name, &s.name, ""))
                .collect();
            chosen = prompter.select(&format!("Which {} setup would you like?", snack.name), &choices)?;
            output_dir = output_dir.join(dir_name(&chosen));
            SetupSelector::Named(&chosen)
        }
    };

    let resolution = resolver::resolve_snack(snack, selector, tool)?;
    installer
        .apply(&resolution, &output_dir, target.manifest_path)
        .await
}

fn first_setup(snack: &SnackEntry) -> Result<&str> {
    snack
        .setup
        .first()
        .map(|s| s.name.as_str())
        .ok_or_else(|| Error::SetupNotFound {
            entry: snack.name.clone(),
            selector: "first".to_string(),
        })
}

/// Lowercase folder name: `Tailwind CSS` becomes `tailwind-css`
pub fn dir_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
