//! Project creation: project type, language, package manager, framework and
//! companion, then scaffold, install dependencies and initialize git
//!
//! Every selection happens before anything is written, so cancelling a prompt
//! leaves the disk untouched. Once execution starts, the first failure aborts
//! the flow.

use super::{finish, Choice, Outcome, Prompter, Session};
use crate::catalog::CompanionEntry;
use crate::error::{EntryKind, Error, Result};
use crate::product::ProductConfig;
use crate::resolver;
use crate::runtime::{CommandRunner, CommandSpec, FileStore};
use std::path::{Path, PathBuf};

/// Everything the user picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPlan {
    pub project_type: String,
    pub language: String,
    pub package_manager: String,
    pub framework: Option<String>,
    pub companion: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub plan: ProjectPlan,
    pub dir: PathBuf,
    pub next_steps: Vec<String>,
}

/// Run the interactive project creation flow
pub async fn run_project<C, P, R, S>(
    config: &C,
    session: &mut Session<'_, P, R, S>,
) -> Result<Outcome<ProjectSummary>>
where
    C: ProductConfig,
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    session
        .prompter
        .intro(&format!("{} - Project Configuration", config.display_name()))?;

    let result = match plan_project(session) {
        Ok(plan) => create_project(config, session, plan).await,
        Err(e) => Err(e),
    };

    let outcome = finish(&mut *session.prompter, result)?;
    if let Outcome::Completed(summary) = &outcome {
        let steps: Vec<String> = summary
            .next_steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}.  {}", i + 1, step))
            .collect();
        session
            .prompter
            .info(&format!("Next steps\n{}", steps.join("\n")))?;
        session.prompter.outro("Happy coding!")?;
    }
    Ok(outcome)
}

/// Collect every selection. Touches nothing on disk.
pub fn plan_project<P, R, S>(session: &mut Session<'_, P, R, S>) -> Result<ProjectPlan>
where
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    let catalog = session.catalog;
    let store = session.store;
    let prompter = &mut *session.prompter;

    let choices: Vec<Choice> = catalog
        .project_types()
        .iter()
        .map(|t| Choice::new(&t.key, &t.name, &t.description))
        .collect();
    let project_type = prompter.select("What type of project would you like to create?", &choices)?;
    let project_type_name = catalog.project_type(&project_type)?.name.clone();

    let languages = catalog.languages_for(&project_type);
    if languages.is_empty() {
        return Err(Error::not_found(EntryKind::Companion, project_type_name));
    }
    let choices: Vec<Choice> = languages
        .iter()
        .map(|l| Choice::new(&l.name, &l.name, &l.description))
        .collect();
    let language = prompter.select("Choose a programming language:", &choices)?;

    let choices: Vec<Choice> = catalog
        .package_managers_for(&language)?
        .iter()
        .map(|pm| Choice::new(&pm.key, &pm.name, ""))
        .collect();
    let package_manager =
        prompter.select(&format!("Choose a package manager for {}:", language), &choices)?;

    let frameworks = catalog.frameworks_for(&language, &project_type)?;
    let framework = if frameworks.is_empty() {
        None
    } else {
        let choices: Vec<Choice> = frameworks
            .iter()
            .map(|f| Choice::new(&f.name, &f.name, &f.description))
            .collect();
        Some(prompter.select("What framework would you like to use?", &choices)?)
    };

    let companions = catalog.companions_matching(&language, &project_type, framework.as_deref())?;
    let companion = match companions.as_slice() {
        [] => {
            return Err(Error::not_found(
                EntryKind::Companion,
                framework.unwrap_or(project_type_name),
            ))
        }
        [only] => {
            prompter.info(&format!("Using {} - {}", only.name, only.description))?;
            only.name.clone()
        }
        many => {
            let choices: Vec<Choice> = many
                .iter()
                .map(|c| Choice::new(&c.name, &c.name, &c.description))
                .collect();
            prompter.select("Which companion framework would you like to use?", &choices)?
        }
    };

    let name = prompter.text("What is your project named?", "my-app", validate_project_name)?;
    let name = name.trim().to_string();

    let dir = session.cwd.join(&name);
    if store.exists(&dir) {
        prompter.warning(&format!("{} already exists", dir.display()))?;
        if !prompter.confirm("Continue anyway?", false)? {
            return Err(Error::Cancelled);
        }
    }

    Ok(ProjectPlan {
        project_type,
        language,
        package_manager,
        framework,
        companion,
        name,
    })
}

/// Reject names that are not a single folder name
pub fn validate_project_name(input: &str) -> Option<String> {
    let name = input.trim();
    if name.is_empty() {
        Some("Please enter a project name".to_string())
    } else if name == "." || name == ".." || name.contains(|c: char| c == '/' || c == '\\') {
        Some("Use a folder name, not a path".to_string())
    } else {
        None
    }
}

async fn create_project<C, P, R, S>(
    config: &C,
    session: &mut Session<'_, P, R, S>,
    plan: ProjectPlan,
) -> Result<ProjectSummary>
where
    C: ProductConfig,
    P: Prompter,
    R: CommandRunner,
    S: FileStore,
{
    let catalog = session.catalog;
    let runner = session.runner;
    let prompter = &mut *session.prompter;

    let companion: &CompanionEntry = catalog
        .companions_for(&plan.language)?
        .iter()
        .find(|c| c.name == plan.companion)
        .ok_or_else(|| Error::not_found(EntryKind::Companion, &plan.companion))?;
    let resolution = resolver::resolve_companion(companion, &plan.package_manager)?;
    let package_manager = catalog.package_manager(&plan.package_manager)?;
    let project_dir = session.cwd.join(&plan.name);

    prompter.info(&format!(
        "Setting up {} with {}...",
        catalog.project_type(&plan.project_type)?.name,
        companion.name
    ))?;

    let mut commands = resolution.commands.iter().filter_map(|line| CommandSpec::parse(line));
    let scaffold = commands.next().ok_or_else(|| Error::InstallerNotFound {
        entry: companion.name.clone(),
        setup: companion.name.clone(),
        tool: plan.package_manager.clone(),
    })?;

    // The scaffolder creates the project folder, named by its last argument
    runner
        .run(
            &scaffold
                .arg(&plan.name)
                .current_dir(&session.cwd)
                .inherit_output(),
        )
        .await?;
    for command in commands {
        runner
            .run(&command.current_dir(&project_dir).inherit_output())
            .await?;
    }

    if let Some(install) = package_manager.install.as_deref().and_then(CommandSpec::parse) {
        prompter.info("Installing dependencies...")?;
        runner
            .run(&install.current_dir(&project_dir).inherit_output())
            .await?;
    }

    init_git(runner, &project_dir, config.default_branch()).await?;

    let framework = plan.framework.as_deref().unwrap_or(&plan.language);
    prompter.success(&format!(
        "Created {} project with {} in {}",
        framework,
        companion.name,
        project_dir.display()
    ))?;

    let mut next_steps = vec![format!("cd {}", plan.name)];
    if let Some(docs) = &companion.documentation {
        next_steps.push(format!("Read the {} docs: {}", companion.name, docs));
    }

    Ok(ProjectSummary {
        plan,
        dir: project_dir,
        next_steps,
    })
}

async fn init_git<R: CommandRunner>(runner: &R, project_dir: &Path, branch: &str) -> Result<()> {
    runner
        .run(&CommandSpec::new("git").arg("init").current_dir(project_dir))
        .await?;
    runner
        .run(
            &CommandSpec::new("git")
                .arg("branch")
                .arg("-M")
                .arg(branch)
                .current_dir(project_dir),
        )
        .await
}
