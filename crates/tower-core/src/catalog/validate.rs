//! Structural checks run once when a catalog is constructed

use super::model::{CatalogData, ToolInstaller};
use super::version;
use std::collections::HashSet;
use url::Url;

/// Collect every problem in the catalog. An empty list means the catalog is usable.
pub fn problems(data: &CatalogData) -> Vec<String> {
    let mut problems = Vec::new();

    if version::parse_version(&data.version).is_err() {
        problems.push(format!("version '{}' is not a semver version", data.version));
    }

    check_unique(
        "project type",
        data.project_types.iter().map(|t| t.key.as_str()),
        &mut problems,
    );
    check_unique(
        "package manager",
        data.package_managers.iter().map(|p| p.key.as_str()),
        &mut problems,
    );
    check_unique(
        "language",
        data.languages.iter().map(|l| l.name.as_str()),
        &mut problems,
    );
    check_unique(
        "snack",
        data.snacks.iter().map(|s| s.name.as_str()),
        &mut problems,
    );

    let package_managers: HashSet<&str> =
        data.package_managers.iter().map(|p| p.key.as_str()).collect();
    let project_types: HashSet<&str> = data.project_types.iter().map(|t| t.key.as_str()).collect();
    let languages: HashSet<&str> = data.languages.iter().map(|l| l.name.as_str()).collect();

    for language in &data.languages {
        let owner = format!("language '{}'", language.name);
        check_unique(
            &format!("package manager of {}", owner),
            language.package_managers.iter().map(String::as_str),
            &mut problems,
        );
        for pm in &language.package_managers {
            if !package_managers.contains(pm.as_str()) {
                problems.push(format!("{} lists undeclared package manager '{}'", owner, pm));
            }
        }
        check_url(&owner, language.documentation.as_deref(), &mut problems);

        let frameworks: HashSet<&str> = language.frameworks.iter().map(|f| f.name.as_str()).collect();
        for companion in &language.companions {
            let owner = format!("companion '{}' of {}", companion.name, language.name);
            for framework in &companion.frameworks {
                if !frameworks.contains(framework.as_str()) {
                    problems.push(format!("{} pairs with unknown framework '{}'", owner, framework));
                }
            }
            for project_type in &companion.project_types {
                if !project_types.contains(project_type.as_str()) {
                    problems.push(format!(
                        "{} creates unknown project type '{}'",
                        owner, project_type
                    ));
                }
            }
            check_installers(&owner, &companion.installers, &mut problems);
            check_url(&owner, companion.documentation.as_deref(), &mut problems);
        }
    }

    for snack in &data.snacks {
        let owner = format!("snack '{}'", snack.name);
        if snack.setup.is_empty() {
            problems.push(format!("{} has no setup options", owner));
        }
        check_unique(
            &format!("setup of {}", owner),
            snack.setup.iter().map(|s| s.name.as_str()),
            &mut problems,
        );
        for language in &snack.languages {
            if !languages.contains(language.as_str()) {
                problems.push(format!("{} targets unknown language '{}'", owner, language));
            }
        }
        check_url(&owner, snack.documentation.as_deref(), &mut problems);

        for setup in &snack.setup {
            let owner = format!("setup '{}' of snack '{}'", setup.name, snack.name);
            check_installers(&owner, &setup.installers, &mut problems);
            for file in &setup.files {
                if file.path.starts_with('/') || file.file_name().is_empty() {
                    problems.push(format!(
                        "{} has template path '{}' without a relative file name",
                        owner, file.path
                    ));
                }
            }
        }
    }

    problems
}

fn check_unique<'a>(
    what: &str,
    names: impl Iterator<Item = &'a str>,
    problems: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            problems.push(format!("duplicate {} '{}'", what, name));
        }
    }
}

/// At most one installer per tool, otherwise lookups would be ambiguous
fn check_installers(owner: &str, installers: &[ToolInstaller], problems: &mut Vec<String>) {
    check_unique(
        &format!("installer tool of {}", owner),
        installers.iter().map(|i| i.tool.as_str()),
        problems,
    );
    for installer in installers {
        if installer.commands.iter().any(|c| c.trim().is_empty()) {
            problems.push(format!("{} has a blank command for {}", owner, installer.tool));
        }
    }
}

fn check_url(owner: &str, url: Option<&str>, problems: &mut Vec<String>) {
    if let Some(url) = url {
        if let Err(e) = Url::parse(url) {
            problems.push(format!("{} has invalid documentation URL '{}': {}", owner, url, e));
        }
    }
}
