//! Java planner and generator (Maven and Gradle)

pub mod dockerfile;
pub mod plan;

pub use dockerfile::{JavaBuild, JavaGenerator};
pub use plan::{JavaFramework, JavaPlanContext, JavaPlanner, JavaProjectType};
