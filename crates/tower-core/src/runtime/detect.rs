//! Ambient project detection: package manager, framework and bundler

use super::store::FileStore;
use crate::catalog::{Bundler, Catalog, Framework, LanguageEntry, PackageManager};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Config files whose presence means the project builds with Vite
pub const VITE_CONFIGS: &[&str] = &[
    "vite.config.ts",
    "vite.config.js",
    "vite.config.mjs",
    "vite.config.mts",
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageJson {
    fn depends_on(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}

/// Inspects an existing project directory through a [`FileStore`]
pub struct EnvironmentDetector<'a, S> {
    store: &'a S,
    root: &'a Path,
}

impl<'a, S: FileStore> EnvironmentDetector<'a, S> {
    pub fn new(store: &'a S, root: &'a Path) -> Self {
        Self { store, root }
    }

    /// First catalog package manager, in declaration order, whose lockfile exists
    pub fn package_manager<'c>(&self, catalog: &'c Catalog) -> Option<&'c PackageManager> {
        catalog.package_managers().iter().find(|pm| {
            pm.lockfiles
                .iter()
                .any(|lockfile| self.store.exists(&self.root.join(lockfile)))
        })
    }

    /// First framework of the language that package.json depends on
    pub fn framework<'c>(&self, language: &'c LanguageEntry) -> Option<&'c Framework> {
        let manifest = self.package_json()?;
        language
            .frameworks
            .iter()
            .find(|f| f.packages.iter().any(|p| manifest.depends_on(p)))
    }

    pub fn bundler(&self) -> Bundler {
        if VITE_CONFIGS
            .iter()
            .any(|name| self.store.exists(&self.root.join(name)))
        {
            Bundler::Vite
        } else {
            Bundler::Other
        }
    }

    fn package_json(&self) -> Option<PackageJson> {
        let path = self.root.join("package.json");
        match self.store.read_to_string(&path) {
            Ok(Some(content)) => match serde_json::from_str(&content) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "unreadable package.json");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "could not read package.json");
                None
            }
        }
    }
}
