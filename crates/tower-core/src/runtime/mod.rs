//! Ports to the outside world and their local adapters
//!
//! This module provides:
//! - File store (read, write, mkdir, existence checks)
//! - Command runner for package-manager, docker and git invocations
//! - Environment detection in an existing project (lockfiles, package.json, bundler config)

pub mod detect;
pub mod runner;
pub mod store;

pub use detect::EnvironmentDetector;
pub use runner::{CommandRunner, CommandSpec, ProcessRunner};
pub use store::{FileStore, LocalFs};
