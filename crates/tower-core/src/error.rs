//! Error taxonomy shared by the catalog, resolver, installer and flows

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of catalog entry a lookup was performed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    ProjectType,
    Language,
    PackageManager,
    Framework,
    Companion,
    Snack,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::ProjectType => "project type",
            EntryKind::Language => "language",
            EntryKind::PackageManager => "package manager",
            EntryKind::Framework => "framework",
            EntryKind::Companion => "companion",
            EntryKind::Snack => "snack",
        };
        f.write_str(name)
    }
}

/// Library-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// The user dismissed a prompt. Not a failure: aborts the enclosing flow.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("{kind} '{name}' not found in catalog")]
    EntryNotFound { kind: EntryKind, name: String },

    #[error("no setup for {entry} matches {selector}")]
    SetupNotFound { entry: String, selector: String },

    #[error("{entry} ({setup}) has no installer for {tool}")]
    InstallerNotFound {
        entry: String,
        setup: String,
        tool: String,
    },

    #[error("invalid catalog:\n{}", bullet_list(.0))]
    InvalidCatalog(Vec<String>),

    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    /// An external command could not start or exited unsuccessfully
    #[error("`{command}` {reason}")]
    Process { command: String, reason: String },

    #[error("failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no package manager detected in {} (no known lockfile found)", .0.display())]
    PackageManagerNotDetected(PathBuf),

    #[error("prompt failed: {0}")]
    Prompt(#[source] io::Error),
}

impl Error {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(kind: EntryKind, name: impl Into<String>) -> Self {
        Error::EntryNotFound {
            kind,
            name: name.into(),
        }
    }

    /// Catalog lookup failures are data defects, never transient
    pub fn is_catalog_lookup(&self) -> bool {
        matches!(
            self,
            Error::EntryNotFound { .. } | Error::SetupNotFound { .. } | Error::InstallerNotFound { .. }
        )
    }
}

fn bullet_list(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_are_classified() {
        assert!(Error::not_found(EntryKind::Snack, "Prisma").is_catalog_lookup());
        assert!(!Error::Cancelled.is_catalog_lookup());
    }

    #[test]
    fn test_messages_name_the_item() {
        let err = Error::InstallerNotFound {
            entry: "Prettier".to_string(),
            setup: "Any".to_string(),
            tool: "cargo".to_string(),
        };
        assert_eq!(err.to_string(), "Prettier (Any) has no installer for cargo");

        let err = Error::not_found(EntryKind::PackageManager, "pip3");
        assert_eq!(err.to_string(), "package manager 'pip3' not found in catalog");
    }

    #[test]
    fn test_invalid_catalog_lists_problems() {
        let err = Error::InvalidCatalog(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid catalog:\n  - a\n  - b");
    }
}
