//! planbox - heuristic build planner for container images
//!
//! This library inspects a project directory, infers its runtime ecosystem and
//! framework, and renders a Dockerfile that builds and runs it. Nothing is
//! executed and no network is touched: every decision comes from file names
//! and file contents.
//!
//! # Core Concepts
//!
//! - **Planner**: reads a project through a [`FileSystem`] and produces
//!   [`PlanMeta`], a flat string-to-string record
//! - **Generator**: renders [`PlanMeta`] into Dockerfile text, filling missing
//!   keys from the ecosystem's [`MetaDefaults`](plan::MetaDefaults) table
//! - **Registry**: maps each [`Ecosystem`] to its planner/generator pair
//!
//! # Example Usage
//!
//! ```no_run
//! use planbox::fs::RealFileSystem;
//! use planbox::PipelineOrchestrator;
//!
//! let fs = RealFileSystem::new("/path/to/project");
//! let output = PipelineOrchestrator::default().execute(&fs, None)?;
//!
//! println!("Ecosystem: {}", output.ecosystem);
//! println!("{}", output.dockerfile);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Project Structure
//!
//! - [`fs`]: source accessor (real directory or in-memory mock)
//! - [`plan`]: metadata record and the planner/generator contract
//! - [`stack`]: per-ecosystem planners, generators and the registry
//! - [`pipeline`]: single-pass planning driver

pub mod cli;
pub mod config;
pub mod fs;
pub mod pipeline;
pub mod plan;
pub mod stack;
pub mod util;

pub use config::{ConfigError, PlanboxConfig};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use pipeline::{PipelineOrchestrator, PlanOutput};
pub use plan::{Ecosystem, Generator, PlanError, PlanMeta, Planner};
pub use stack::StackRegistry;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_planbox() {
        assert_eq!(NAME, "planbox");
    }
}
