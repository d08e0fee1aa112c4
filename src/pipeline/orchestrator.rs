use crate::fs::FileSystem;
use crate::plan::{Ecosystem, PlanMeta};
use crate::stack::StackRegistry;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Everything one planning run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutput {
    pub ecosystem: Ecosystem,
    pub meta: PlanMeta,
    pub dockerfile: String,
}

/// Runs source accessor → planner → generator in a single pass
pub struct PipelineOrchestrator {
    registry: StackRegistry,
}

impl PipelineOrchestrator {
    pub fn new(registry: StackRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StackRegistry {
        &self.registry
    }

    /// Plans a project and renders its Dockerfile. Without an explicit
    /// ecosystem one is picked from marker files.
    pub fn execute(&self, fs: &dyn FileSystem, ecosystem: Option<Ecosystem>) -> Result<PlanOutput> {
        let start = Instant::now();
        let ecosystem = match ecosystem {
            Some(ecosystem) => ecosystem,
            None => self.registry.detect_ecosystem(fs),
        };
        info!(ecosystem = %ecosystem, "Planning project");

        let planner = self
            .registry
            .planner(ecosystem)
            .ok_or_else(|| anyhow!("No planner registered for {}", ecosystem))?;
        let meta = planner.plan(fs);
        for (key, value) in meta.iter() {
            debug!(key, value, "Plan metadata");
        }

        let dockerfile = self.render(ecosystem, &meta)?;

        info!(
            ecosystem = %ecosystem,
            keys = meta.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Plan complete"
        );

        Ok(PlanOutput {
            ecosystem,
            meta,
            dockerfile,
        })
    }

    /// Renders metadata with the ecosystem's generator
    pub fn render(&self, ecosystem: Ecosystem, meta: &PlanMeta) -> Result<String> {
        let generator = self
            .registry
            .generator(ecosystem)
            .ok_or_else(|| anyhow!("No generator registered for {}", ecosystem))?;
        Ok(generator.generate(meta))
    }
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new(StackRegistry::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_execute_detects_ecosystem() {
        let fs = MockFileSystem::new()
            .with_file("requirements.txt", "Flask==2.0\n")
            .with_file("app.py", "app = Flask(__name__)\n");
        let output = PipelineOrchestrator::default().execute(&fs, None).unwrap();

        assert_eq!(output.ecosystem, Ecosystem::Python);
        assert_eq!(output.meta.get("framework"), Some("flask"));
        assert!(output.dockerfile.ends_with("CMD gunicorn --bind :8080 app:app"));
    }

    #[test]
    fn test_execute_with_forced_ecosystem() {
        let fs = MockFileSystem::new().with_file("requirements.txt", "flask\n");
        let output = PipelineOrchestrator::default()
            .execute(&fs, Some(Ecosystem::Static))
            .unwrap();

        assert_eq!(output.ecosystem, Ecosystem::Static);
        assert!(output.meta.is_empty());
    }

    #[test]
    fn test_missing_generator_is_error() {
        let orchestrator = PipelineOrchestrator::new(StackRegistry::new());
        let err = orchestrator
            .render(Ecosystem::Java, &PlanMeta::new())
            .unwrap_err();
        assert!(err.to_string().contains("java"));
    }

    #[test]
    fn test_output_serializes() {
        let output = PlanOutput {
            ecosystem: Ecosystem::NodeJs,
            meta: [("packageManager", "npm")].into_iter().collect(),
            dockerfile: "FROM node:18".to_string(),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["ecosystem"], "nodejs");
        assert_eq!(json["meta"]["packageManager"], "npm");
    }
}
