//! Static registry of project types, languages, companions, package managers and snacks
//!
//! The catalog is parsed once at startup, validated, and then only read. Declaration
//! order is significant: it is prompt order and the order in which setup options
//! are tried during automatic resolution.

pub mod model;
pub mod validate;
pub mod version;

use crate::error::{EntryKind, Error, Result};
use crate::product::ProductConfig;
use std::path::Path;

pub use model::{
    Bundler, CatalogData, CommandDir, CompanionEntry, Framework, LanguageEntry, PackageManager,
    ProjectType, SetupOption, SetupStrategy, SnackEntry, TemplateFile, ToolInstaller,
};

/// Catalog shipped with the binary
pub const BUILTIN_CATALOG: &str = include_str!("../../catalog.yaml");

/// Immutable, validated catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
}

impl Catalog {
    /// Validate catalog data. All problems are reported together.
    pub fn new(data: CatalogData) -> Result<Self> {
        let problems = validate::problems(&data);
        if !problems.is_empty() {
            return Err(Error::InvalidCatalog(problems));
        }
        Ok(Self { data })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let data: CatalogData = serde_yaml::from_str(content)?;
        Self::new(data)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::fs("read catalog", path, e))?;
        Self::from_yaml(&content)
    }

    /// Load the catalog named by the product's override variable, or the builtin one
    pub fn load<C: ProductConfig>(config: &C) -> Result<Self> {
        match std::env::var_os(config.catalog_env()) {
            Some(path) if !path.is_empty() => {
                tracing::debug!(path = ?path, "loading catalog override");
                Self::from_file(Path::new(&path))
            }
            _ => Self::builtin(),
        }
    }

    pub fn version(&self) -> &str {
        &self.data.version
    }

    pub fn project_types(&self) -> &[ProjectType] {
        &self.data.project_types
    }

    pub fn project_type(&self, key: &str) -> Result<&ProjectType> {
        self.data
            .project_types
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| Error::not_found(EntryKind::ProjectType, key))
    }

    pub fn languages(&self) -> &[LanguageEntry] {
        &self.data.languages
    }

    pub fn language(&self, name: &str) -> Result<&LanguageEntry> {
        self.data
            .languages
            .iter()
            .find(|l| l.name == name)
            .ok_or_else(|| Error::not_found(EntryKind::Language, name))
    }

    pub fn package_manager(&self, key: &str) -> Result<&PackageManager> {
        self.data
            .package_managers
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| Error::not_found(EntryKind::PackageManager, key))
    }

    /// All declared package managers, in detection order
    pub fn package_managers(&self) -> &[PackageManager] {
        &self.data.package_managers
    }

    /// Package managers of a language, in the language's order
    pub fn package_managers_for(&self, language: &str) -> Result<Vec<&PackageManager>> {
        self.language(language)?
            .package_managers
            .iter()
            .map(|key| self.package_manager(key))
            .collect()
    }

    /// First language that lists the package manager
    pub fn language_for_package_manager(&self, key: &str) -> Option<&LanguageEntry> {
        self.data
            .languages
            .iter()
            .find(|l| l.package_managers.iter().any(|p| p == key))
    }

    pub fn companions_for(&self, language: &str) -> Result<&[CompanionEntry]> {
        Ok(&self.language(language)?.companions)
    }

    /// Companions of a language that create the project type and pair with the framework
    pub fn companions_matching(
        &self,
        language: &str,
        project_type: &str,
        framework: Option<&str>,
    ) -> Result<Vec<&CompanionEntry>> {
        Ok(self
            .companions_for(language)?
            .iter()
            .filter(|c| c.creates(project_type) && c.pairs_with(framework))
            .collect())
    }

    /// Frameworks of a language that have at least one companion for the project type
    pub fn frameworks_for(&self, language: &str, project_type: &str) -> Result<Vec<&Framework>> {
        let entry = self.language(language)?;
        Ok(entry
            .frameworks
            .iter()
            .filter(|f| {
                entry
                    .companions
                    .iter()
                    .any(|c| c.creates(project_type) && c.pairs_with(Some(&f.name)))
            })
            .collect())
    }

    /// Languages with at least one companion for the project type
    pub fn languages_for(&self, project_type: &str) -> Vec<&LanguageEntry> {
        self.data
            .languages
            .iter()
            .filter(|l| l.companions.iter().any(|c| c.creates(project_type)))
            .collect()
    }

    pub fn snacks(&self) -> &[SnackEntry] {
        &self.data.snacks
    }

    pub fn snack(&self, name: &str) -> Result<&SnackEntry> {
        self.data
            .snacks
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::not_found(EntryKind::Snack, name))
    }

    /// Snacks whose language and framework filters admit the project
    pub fn snacks_for(&self, language: Option<&str>, framework: Option<&str>) -> Vec<&SnackEntry> {
        self.data
            .snacks
            .iter()
            .filter(|s| s.applies_to(language, framework))
            .collect()
    }
}
