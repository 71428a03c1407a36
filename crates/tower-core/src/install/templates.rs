//! Template file materialization

use crate::catalog::TemplateFile;
use crate::error::Result;
use crate::runtime::FileStore;
use std::path::{Path, PathBuf};

/// Write template files into `output_dir`.
///
/// Only the leaf file name of each catalog path is kept: `a/b/config.json` lands
/// at `<output_dir>/config.json`. Content is trimmed; absent content yields an
/// empty file.
pub fn materialize_templates<S: FileStore>(
    store: &S,
    files: &[TemplateFile],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    store.create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = output_dir.join(file.file_name());
        let content = file.content.as_deref().map(str::trim).unwrap_or_default();
        store.write(&target, content)?;
        written.push(target);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::LocalFs;
    use std::fs;

    fn file(path: &str, content: Option<&str>) -> TemplateFile {
        TemplateFile {
            path: path.to_string(),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn test_paths_are_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("snacks/tailwind");

        let written =
            materialize_templates(&LocalFs, &[file("a/b/config.json", Some("{}"))], &out).unwrap();

        assert_eq!(written, vec![out.join("config.json")]);
        assert!(out.join("config.json").exists());
        assert!(!out.join("a").exists());
    }

    #[test]
    fn test_content_is_trimmed_and_missing_content_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_path_buf();

        materialize_templates(
            &LocalFs,
            &[
                file("./src/index.css", Some("\n  @import \"tailwindcss\";\n\n")),
                file("local.db", None),
            ],
            &out,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(out.join("index.css")).unwrap(),
            "@import \"tailwindcss\";"
        );
        assert_eq!(fs::read_to_string(out.join("local.db")).unwrap(), "");
    }

    #[test]
    fn test_rewriting_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let files = [file("./.prettierrc", Some("{ \"semi\": true }"))];

        materialize_templates(&LocalFs, &files, dir.path()).unwrap();
        materialize_templates(&LocalFs, &files, dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(".prettierrc")).unwrap(),
            "{ \"semi\": true }"
        );
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("snacks");
        fs::write(&blocker, "not a directory").unwrap();

        let err = materialize_templates(&LocalFs, &[file("x.txt", None)], &blocker.join("x"))
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
