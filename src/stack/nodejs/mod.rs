//! Node.js planner and generator

pub mod dockerfile;
pub mod plan;

pub use dockerfile::{NodeBuild, NodeGenerator, StaticOutput, STATIC_OUTPUTS};
pub use plan::{NodeFramework, NodePlanContext, NodePlanner, PackageJson, PackageManager};
