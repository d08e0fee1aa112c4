//! Python planner and generator
//!
//! Detection is driven by `requirements.txt`, the entry-file candidates and the
//! dependency manifests; see [`context`]. The resulting metadata carries the
//! `framework`, `install`, `start` and `apt-deps` keys.

pub mod context;
pub mod dockerfile;
pub mod plan;

pub use context::{has_dependency, weak_contains, PythonFramework, PythonPlanContext};
pub use dockerfile::{PythonBuild, PythonGenerator};
pub use plan::PythonPlanner;
