//! Aggregated documentation links for the selected snacks

use crate::catalog::SnackEntry;
use crate::error::Result;
use crate::runtime::FileStore;
use std::path::Path;

/// Render the docs file. Entries without a documentation URL are skipped.
pub fn render_docs<'a>(entries: impl IntoIterator<Item = &'a SnackEntry>) -> String {
    let mut out = String::from("# Documentation Links");
    for entry in entries {
        if let Some(url) = &entry.documentation {
            out.push_str(&format!("\n\n## {}\n{}", entry.name, url));
        }
    }
    out.push('\n');
    out
}

/// Regenerate the docs file in full. Unlike the manifest this is a derived
/// summary, so previous content is replaced.
pub fn write_docs<'a, S: FileStore>(
    store: &S,
    path: &Path,
    entries: impl IntoIterator<Item = &'a SnackEntry>,
) -> Result<()> {
    store.write(path, &render_docs(entries))
}
