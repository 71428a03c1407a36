//! Shared, append-only commands manifest
//!
//! The manifest is a sequence of sections, each a `# <name>` header followed by
//! that section's command lines, separated by exactly one blank line. Section
//! names are unique, so re-applying a snack leaves the file untouched. Every write
//! to the manifest goes through this module.

use crate::error::Result;
use crate::runtime::FileStore;
use std::path::Path;

/// What [`append_commands`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// A new section was written
    Written,
    /// The section header was already present
    AlreadyPresent,
    /// Nothing to record; the file was not touched
    Empty,
}

pub fn section_header(section: &str) -> String {
    format!("# {}", section)
}

/// Whether `content` already has the exact header line for `section`
pub fn has_section(content: &str, section: &str) -> bool {
    let header = section_header(section);
    content.lines().any(|line| line.trim_end() == header)
}

/// Manifest content after appending a section. Existing content is trimmed so
/// sections are always separated by exactly one blank line.
pub fn compose(existing: &str, section: &str, commands: &[String]) -> String {
    let mut block = section_header(section);
    for command in commands {
        block.push('\n');
        block.push_str(command);
    }

    let existing = existing.trim();
    if existing.is_empty() {
        block
    } else {
        format!("{}\n\n{}", existing, block)
    }
}

/// Append a section of commands to the manifest unless it is already recorded
pub fn append_commands<S: FileStore>(
    store: &S,
    manifest_path: &Path,
    section: &str,
    commands: &[String],
) -> Result<Appended> {
    if commands.is_empty() {
        return Ok(Appended::Empty);
    }

    let existing = store.read_to_string(manifest_path)?.unwrap_or_default();
    if has_section(&existing, section) {
        tracing::debug!(section, "manifest section already present");
        return Ok(Appended::AlreadyPresent);
    }

    store.write(manifest_path, &compose(&existing, section, commands))?;
    tracing::debug!(section, commands = commands.len(), "manifest section written");
    Ok(Appended::Written)
}

/// Create an empty manifest if none exists. Existing content is never touched.
pub fn ensure_manifest<S: FileStore>(store: &S, manifest_path: &Path) -> Result<()> {
    if !store.exists(manifest_path) {
        store.write(manifest_path, "")?;
    }
    Ok(())
}
