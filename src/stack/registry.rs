use super::java::{JavaGenerator, JavaPlanner};
use super::nodejs::{NodeGenerator, NodePlanner};
use super::python::{PythonGenerator, PythonPlanner};
use super::static_site::{StaticGenerator, StaticPlanner};
use crate::fs::FileSystem;
use crate::plan::{Ecosystem, Generator, Planner};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Marker files per ecosystem, probed in this order. Static is the fallback.
pub const ECOSYSTEM_MARKERS: &[(Ecosystem, &[&str])] = &[
    (
        Ecosystem::Java,
        &["pom.xml", "build.gradle", "build.gradle.kts"],
    ),
    (Ecosystem::NodeJs, &["package.json"]),
    (
        Ecosystem::Python,
        &[
            "requirements.txt",
            "Pipfile",
            "pyproject.toml",
            "main.py",
            "app.py",
            "manage.py",
        ],
    ),
];

/// Planner/generator pair for every ecosystem
pub struct StackRegistry {
    planners: HashMap<Ecosystem, Box<dyn Planner>>,
    generators: HashMap<Ecosystem, Box<dyn Generator>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self {
            planners: HashMap::new(),
            generators: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for ecosystem in Ecosystem::all_variants() {
            let (planner, generator): (Box<dyn Planner>, Box<dyn Generator>) = match ecosystem {
                Ecosystem::Python => (Box::new(PythonPlanner), Box::new(PythonGenerator)),
                Ecosystem::Java => (Box::new(JavaPlanner), Box::new(JavaGenerator)),
                Ecosystem::NodeJs => (Box::new(NodePlanner), Box::new(NodeGenerator)),
                Ecosystem::Static => (Box::new(StaticPlanner), Box::new(StaticGenerator)),
            };
            registry.register(planner, generator);
        }

        registry
    }

    pub fn register(&mut self, planner: Box<dyn Planner>, generator: Box<dyn Generator>) {
        self.planners.insert(planner.ecosystem(), planner);
        self.generators.insert(generator.ecosystem(), generator);
    }

    pub fn planner(&self, ecosystem: Ecosystem) -> Option<&dyn Planner> {
        self.planners.get(&ecosystem).map(|p| p.as_ref())
    }

    pub fn generator(&self, ecosystem: Ecosystem) -> Option<&dyn Generator> {
        self.generators.get(&ecosystem).map(|g| g.as_ref())
    }

    /// Picks an ecosystem from marker files, first match wins
    pub fn detect_ecosystem(&self, fs: &dyn FileSystem) -> Ecosystem {
        let detected = ECOSYSTEM_MARKERS
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| fs.exists(Path::new(m))))
            .map(|(ecosystem, _)| *ecosystem)
            .unwrap_or(Ecosystem::Static);
        debug!(ecosystem = %detected, "Detected ecosystem");
        detected
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
