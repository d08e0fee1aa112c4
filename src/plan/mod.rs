//! Planner/generator contract shared by every ecosystem.
//!
//! A [`Planner`] reads a project through a [`FileSystem`] and returns
//! [`PlanMeta`]. A [`Generator`] renders that metadata into Dockerfile text
//! without touching the filesystem. Neither side fails: missing files become
//! defaults in the planner, missing keys become defaults in the generator.

#[macro_use]
pub mod id_enum_macro;

mod error;
mod meta;

pub use error::PlanError;
pub use meta::{MetaDefaults, PlanMeta};

use crate::fs::FileSystem;

crate::define_tag_enum! {
    /// Runtime ecosystem a project is planned for
    Ecosystem: "ecosystem" {
        Python => "python",
        Java => "java",
        NodeJs => "nodejs" | "node",
        Static => "static",
    }
}

/// Detection + assembly for one ecosystem
pub trait Planner: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Inspect the project and assemble its metadata
    fn plan(&self, fs: &dyn FileSystem) -> PlanMeta;
}

/// Pure rendering of metadata into build instructions
pub trait Generator: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Default table (and key vocabulary) this generator consumes
    fn defaults(&self) -> &'static MetaDefaults;

    fn generate(&self, meta: &PlanMeta) -> String;
}
