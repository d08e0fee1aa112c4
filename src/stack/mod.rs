//! Per-ecosystem planners and generators.
//!
//! Each ecosystem module pairs a [`Planner`](crate::plan::Planner) that
//! inspects the project with a [`Generator`](crate::plan::Generator) that
//! renders the Dockerfile. [`StackRegistry`] looks them up by
//! [`Ecosystem`](crate::plan::Ecosystem).

pub mod java;
pub mod nodejs;
pub mod python;
pub mod registry;
pub mod static_site;

pub use registry::{StackRegistry, ECOSYSTEM_MARKERS};
