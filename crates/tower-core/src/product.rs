//! Product configuration trait for CLI binaries
//!
//! This trait defines the identity and on-disk layout the flows use, so the same
//! engine can back differently branded binaries.

/// Configuration trait for a scaffolding CLI product
///
/// Each product defines:
/// - Product identity (name, display name)
/// - Where an alternative catalog can be supplied
/// - The names of the files and directories the snack flow writes
/// - The branch name new repositories start on
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable naming a catalog file that replaces the builtin one,
    /// `<NAME>_CATALOG` for the product name
    fn catalog_env(&self) -> String {
        let name: String = self
            .name()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}_CATALOG", name)
    }

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Directory, relative to the project, that receives snack output
    fn snacks_dir(&self) -> &'static str {
        "snacks"
    }

    /// Shared commands manifest inside the snacks directory
    fn manifest_file(&self) -> &'static str {
        "commands.txt"
    }

    /// Aggregated documentation links inside the snacks directory
    fn docs_file(&self) -> &'static str {
        "docs.md"
    }

    /// Branch new repositories are renamed to after `git init`
    fn default_branch(&self) -> &'static str {
        "main"
    }
}
