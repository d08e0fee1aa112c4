//! Single-pass planning pipeline

pub mod orchestrator;

pub use orchestrator::{PipelineOrchestrator, PlanOutput};
