//! Turns a catalog selection into the concrete commands and files to apply
//!
//! Resolution is pure: it never touches the filesystem. Ambient context such as
//! the detected bundler is detected by the caller and passed in as a selector.

use crate::catalog::{Bundler, CommandDir, CompanionEntry, SetupOption, SnackEntry, TemplateFile};
use crate::error::{Error, Result};
use std::fmt;

/// How to choose among a snack's setup options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupSelector<'a> {
    /// First setup, in declaration order, with an installer for the tool
    Auto,
    /// Setup with exactly this name
    Named(&'a str),
    /// First setup tagged with the detected bundler
    Bundler(Bundler),
}

impl fmt::Display for SetupSelector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupSelector::Auto => write!(f, "auto"),
            SetupSelector::Named(name) => write!(f, "'{}'", name),
            SetupSelector::Bundler(bundler) => write!(f, "bundler {}", bundler),
        }
    }
}

/// Fully determined commands and files for one entry and tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Snack or companion name
    pub entry: String,
    /// Chosen setup option name (the companion name for companions)
    pub setup: String,
    /// Installer key the commands were picked for
    pub tool: String,
    /// Manifest section name
    pub section: String,
    pub commands: Vec<String>,
    /// Where `commands` run
    pub cwd: CommandDir,
    pub files: Vec<TemplateFile>,
    /// Follow-up instructions for the user
    pub notes: Option<String>,
}

/// Pick the setup option for a snack
pub fn select_setup<'s>(
    snack: &'s SnackEntry,
    selector: SetupSelector<'_>,
    tool: &str,
) -> Result<&'s SetupOption> {
    let found = match selector {
        SetupSelector::Auto => snack.setup.iter().find(|s| s.installer(tool).is_some()),
        SetupSelector::Named(name) => snack.setup_option(name),
        SetupSelector::Bundler(bundler) => snack.setup.iter().find(|s| s.bundler == Some(bundler)),
    };

    found.ok_or_else(|| Error::SetupNotFound {
        entry: snack.name.clone(),
        selector: selector.to_string(),
    })
}

/// Resolve a snack for a tool.
///
/// A setup that declares no installers at all is template-only and resolves to
/// an empty command list. A setup with installers, none of them for `tool`,
/// fails with [`Error::InstallerNotFound`].
pub fn resolve_snack(
    snack: &SnackEntry,
    selector: SetupSelector<'_>,
    tool: &str,
) -> Result<Resolution> {
    let setup = select_setup(snack, selector, tool)?;

    let (commands, cwd) = if setup.installers.is_empty() {
        (Vec::new(), CommandDir::default())
    } else {
        let installer = setup
            .installer(tool)
            .ok_or_else(|| Error::InstallerNotFound {
                entry: snack.name.clone(),
                setup: setup.name.clone(),
                tool: tool.to_string(),
            })?;
        (installer.commands.clone(), installer.cwd)
    };

    tracing::debug!(
        snack = %snack.name,
        setup = %setup.name,
        tool,
        commands = commands.len(),
        "resolved snack"
    );

    Ok(Resolution {
        entry: snack.name.clone(),
        setup: setup.name.clone(),
        tool: tool.to_string(),
        section: snack.section_name(&setup.name),
        commands,
        cwd,
        files: setup.files.clone(),
        notes: setup.notes.clone(),
    })
}

/// Resolve a companion's project-creation commands for a package manager
pub fn resolve_companion(companion: &CompanionEntry, tool: &str) -> Result<Resolution> {
    let installer = companion
        .installer(tool)
        .ok_or_else(|| Error::InstallerNotFound {
            entry: companion.name.clone(),
            setup: companion.name.clone(),
            tool: tool.to_string(),
        })?;

    Ok(Resolution {
        entry: companion.name.clone(),
        setup: companion.name.clone(),
        tool: tool.to_string(),
        section: companion.name.clone(),
        commands: installer.commands.clone(),
        cwd: installer.cwd,
        files: Vec::new(),
        notes: None,
    })
}
