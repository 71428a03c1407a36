//! Tower Core - Catalog-driven project and add-on scaffolding
//!
//! This library creates new projects from a catalog of languages, frameworks and
//! companion scaffolders, and prepares add-ons ("snacks") for existing projects.
//! It is driven by a CLI binary that supplies a [`ProductConfig`] and the
//! terminal adapters.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Data** - The immutable, validated [`Catalog`] and the pure resolver
//!   that turns a selection into commands and template files
//! - **Layer 2: Effects** - Ports for files, processes and prompts ([`FileStore`],
//!   [`CommandRunner`], [`Prompter`]), the [`Installer`] and the commands manifest
//! - **Layer 3: Flows** - The `power` and `snacks` orchestrators, plus optional
//!   cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt provider
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use tower_core::{resolver, Catalog, SetupSelector};
//!
//! let catalog = Catalog::builtin()?;
//! let snack = catalog.snack("Prettier")?;
//! let resolution = resolver::resolve_snack(snack, SetupSelector::Auto, "pnpm")?;
//! ```

pub mod catalog;
pub mod error;
pub mod flow;
pub mod install;
pub mod product;
pub mod resolver;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use flow::{run_project, run_snacks, BatchReport, Outcome, Prompter, Session};
pub use install::Installer;
pub use product::ProductConfig;
pub use resolver::{Resolution, SetupSelector};
pub use runtime::{CommandRunner, FileStore, LocalFs, ProcessRunner};

#[cfg(feature = "tui")]
pub use tui::ClackPrompter;
