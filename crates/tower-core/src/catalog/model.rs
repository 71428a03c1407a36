//! Catalog document types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root catalog document (catalog.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Semver version for CLI compatibility checking
    pub version: String,

    #[serde(default)]
    pub project_types: Vec<ProjectType>,

    #[serde(default)]
    pub package_managers: Vec<PackageManager>,

    #[serde(default)]
    pub languages: Vec<LanguageEntry>,

    #[serde(default)]
    pub snacks: Vec<SnackEntry>,
}

/// A kind of project the `power` flow can create
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectType {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManager {
    /// Tool identifier used as the installer lookup key (e.g. "npm")
    pub key: String,

    /// Label shown in prompts
    pub name: String,

    /// Lockfiles whose presence identifies this package manager
    #[serde(default)]
    pub lockfiles: Vec<String>,

    /// Command line that installs dependencies inside a new project
    #[serde(default)]
    pub install: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Package manager keys, in prompt order
    pub package_managers: Vec<String>,

    #[serde(default)]
    pub frameworks: Vec<Framework>,

    #[serde(default)]
    pub companions: Vec<CompanionEntry>,

    #[serde(default)]
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Dependency names that identify this framework in package.json
    #[serde(default)]
    pub packages: Vec<String>,
}

/// A build-tool or meta-framework pairing that creates a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionEntry {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Parent frameworks this companion pairs with. Empty means framework-less.
    #[serde(default)]
    pub frameworks: Vec<String>,

    /// Project type keys this companion can create
    #[serde(default = "default_project_types")]
    pub project_types: Vec<String>,

    #[serde(default)]
    pub installers: Vec<ToolInstaller>,

    #[serde(default)]
    pub documentation: Option<String>,
}

fn default_project_types() -> Vec<String> {
    vec!["web".to_string()]
}

impl CompanionEntry {
    pub fn installer(&self, tool: &str) -> Option<&ToolInstaller> {
        self.installers.iter().find(|i| i.tool == tool)
    }

    pub fn creates(&self, project_type: &str) -> bool {
        self.project_types.iter().any(|t| t == project_type)
    }

    pub fn pairs_with(&self, framework: Option<&str>) -> bool {
        match framework {
            Some(name) => self.frameworks.iter().any(|f| f == name),
            None => self.frameworks.is_empty(),
        }
    }
}

/// Ordered commands that install something with one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInstaller {
    /// Package manager key or generic tool name (e.g. "docker")
    pub tool: String,
    pub commands: Vec<String>,

    /// Directory the commands run in
    #[serde(default)]
    pub cwd: CommandDir,
}

/// Where an installer's commands are executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandDir {
    /// The project root
    #[default]
    Project,
    /// The snack's output directory, next to its template files
    Output,
}

/// An add-on installable into an existing project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnackEntry {
    /// Globally unique; used as the manifest section key
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Languages this snack applies to. Empty means any.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Frameworks this snack applies to. Empty means any.
    #[serde(default)]
    pub frameworks: Vec<String>,

    #[serde(default)]
    pub documentation: Option<String>,

    /// Installer key overriding the detected package manager
    #[serde(default)]
    pub tool: Option<String>,

    #[serde(default)]
    pub select: SetupStrategy,

    /// Environment-specific variants, in priority order
    pub setup: Vec<SetupOption>,
}

impl SnackEntry {
    pub fn setup_option(&self, name: &str) -> Option<&SetupOption> {
        self.setup.iter().find(|s| s.name == name)
    }

    pub fn applies_to(&self, language: Option<&str>, framework: Option<&str>) -> bool {
        let language_ok = match language {
            Some(lang) if !self.languages.is_empty() => self.languages.iter().any(|l| l == lang),
            _ => true,
        };
        let framework_ok = match framework {
            Some(fw) if !self.frameworks.is_empty() => self.frameworks.iter().any(|f| f == fw),
            _ => true,
        };
        language_ok && framework_ok
    }

    /// Manifest section name for one of this snack's setups. The setup is
    /// named whenever it was chosen rather than implied.
    pub fn section_name(&self, setup: &str) -> String {
        if self.setup.len() > 1 || self.select != SetupStrategy::First {
            format!("{} ({})", self.name, setup)
        } else {
            self.name.clone()
        }
    }
}

/// How the snack flow chooses a snack's setup option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStrategy {
    /// The sole or first declared setup
    #[default]
    First,
    /// First setup with an installer for the active tool
    Auto,
    /// Setup tagged with the detected bundler
    Bundler,
    /// Ask the user
    Prompt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupOption {
    pub name: String,

    /// Bundler context this variant applies to
    #[serde(default)]
    pub bundler: Option<Bundler>,

    #[serde(default)]
    pub installers: Vec<ToolInstaller>,

    #[serde(default)]
    pub files: Vec<TemplateFile>,

    /// Follow-up instructions shown once the setup is prepared
    #[serde(default)]
    pub notes: Option<String>,
}

impl SetupOption {
    pub fn installer(&self, tool: &str) -> Option<&ToolInstaller> {
        self.installers.iter().find(|i| i.tool == tool)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    pub path: String,

    /// Absent content creates an empty file
    #[serde(default)]
    pub content: Option<String>,
}

impl TemplateFile {
    /// Leaf file name of the catalog path
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(&self.path)
    }
}

/// Ambient build-tool context of an existing project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bundler {
    Vite,
    Other,
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bundler::Vite => f.write_str("Vite"),
            Bundler::Other => f.write_str("no Vite config"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snack(setups: &[&str]) -> SnackEntry {
        SnackEntry {
            name: "Tailwind CSS".to_string(),
            description: String::new(),
            languages: vec!["TypeScript".to_string()],
            frameworks: vec!["React".to_string(), "Vue".to_string()],
            documentation: None,
            tool: None,
            select: SetupStrategy::Bundler,
            setup: setups
                .iter()
                .map(|name| SetupOption {
                    name: name.to_string(),
                    bundler: None,
                    installers: Vec::new(),
                    files: Vec::new(),
                    notes: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_section_name_includes_chosen_setup() {
        assert_eq!(snack(&["Vite", "PostCSS"]).section_name("Vite"), "Tailwind CSS (Vite)");
        assert_eq!(snack(&["Vite"]).section_name("Vite"), "Tailwind CSS (Vite)");

        let mut plain = snack(&["Any"]);
        plain.select = SetupStrategy::First;
        assert_eq!(plain.section_name("Any"), "Tailwind CSS");
    }

    #[test]
    fn test_applies_to_filters() {
        let s = snack(&["Vite"]);
        assert!(s.applies_to(Some("TypeScript"), Some("React")));
        assert!(s.applies_to(Some("TypeScript"), None));
        assert!(s.applies_to(None, None));
        assert!(!s.applies_to(Some("Python"), None));
        assert!(!s.applies_to(Some("TypeScript"), Some("Svelte")));
    }

    #[test]
    fn test_template_file_name() {
        let file = TemplateFile {
            path: "./src/index.css".to_string(),
            content: None,
        };
        assert_eq!(file.file_name(), "index.css");

        let file = TemplateFile {
            path: "settings.json".to_string(),
            content: None,
        };
        assert_eq!(file.file_name(), "settings.json");
    }

    #[test]
    fn test_strategy_defaults_to_first() {
        let yaml = "name: Prettier\nsetup:\n  - name: Any\n";
        let parsed: SnackEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.select, SetupStrategy::First);
        assert!(parsed.setup[0].installers.is_empty());
    }

    #[test]
    fn test_companion_defaults_to_web() {
        let yaml = "name: Vite\nframeworks: [React]\n";
        let parsed: CompanionEntry = serde_yaml::from_str(yaml).unwrap();
        assert!(parsed.creates("web"));
        assert!(parsed.pairs_with(Some("React")));
        assert!(!parsed.pairs_with(None));
    }
}
