//! Dockerfile generation for Python projects

use crate::plan::{Ecosystem, Generator, MetaDefaults, PlanMeta};

pub const BASE_IMAGE: &str = "docker.io/library/python:3.8.2-slim-buster";

pub static DEFAULTS: MetaDefaults = MetaDefaults::new(
    "python",
    &[
        ("framework", ""),
        ("install", "echo \"skip install\""),
        ("start", "python main.py"),
        ("apt-deps", ""),
    ],
);

/// Typed view over the keys the Python template reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonBuild<'a> {
    pub install: &'a str,
    pub start: &'a str,
    pub apt_deps: &'a str,
}

impl<'a> PythonBuild<'a> {
    pub fn from_meta(meta: &'a PlanMeta) -> Self {
        meta.warn_unrecognized(&DEFAULTS);
        Self {
            install: meta.resolve("install", &DEFAULTS),
            start: meta.resolve("start", &DEFAULTS),
            apt_deps: meta.resolve("apt-deps", &DEFAULTS),
        }
    }
}

pub struct PythonGenerator;

impl Generator for PythonGenerator {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    fn defaults(&self) -> &'static MetaDefaults {
        &DEFAULTS
    }

    fn generate(&self, meta: &PlanMeta) -> String {
        let build = PythonBuild::from_meta(meta);

        format!(
            "FROM {base}\n\
             WORKDIR /app\n\
             RUN apt-get update\n\
             RUN apt-get install {apt_deps} gcc -y\n\
             RUN rm -rf /var/lib/apt/lists/*\n\
             COPY . .\n\
             RUN {install}\n\
             EXPOSE 8080\n\
             CMD {start}",
            base = BASE_IMAGE,
            apt_deps = build.apt_deps,
            install = build.install,
            start = build.start,
        )
    }
}
