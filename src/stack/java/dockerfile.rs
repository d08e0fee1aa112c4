//! Dockerfile generation for Java projects

use super::plan::{JavaFramework, JavaProjectType};
use crate::plan::{Ecosystem, Generator, MetaDefaults, PlanMeta};
use tracing::warn;

pub static DEFAULTS: MetaDefaults = MetaDefaults::new(
    "java",
    &[("type", "maven"), ("framework", ""), ("jdk", "17")],
);

/// Typed view over the keys the Java template reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaBuild<'a> {
    pub project_type: JavaProjectType,
    pub framework: Option<JavaFramework>,
    pub jdk: &'a str,
}

impl<'a> JavaBuild<'a> {
    pub fn from_meta(meta: &'a PlanMeta) -> Self {
        meta.warn_unrecognized(&DEFAULTS);

        let type_tag = meta.resolve("type", &DEFAULTS);
        let project_type = JavaProjectType::from_tag(type_tag).unwrap_or_else(|| {
            warn!(value = type_tag, "Unknown Java project type, using maven");
            JavaProjectType::Maven
        });

        Self {
            project_type,
            framework: JavaFramework::from_tag(meta.resolve("framework", &DEFAULTS)),
            jdk: meta.resolve("jdk", &DEFAULTS),
        }
    }

    fn jar_glob(&self) -> &'static str {
        match self.project_type {
            JavaProjectType::Maven => "target/*.jar",
            JavaProjectType::Gradle => "build/libs/*.jar",
        }
    }

    fn start_cmd(&self) -> String {
        match self.framework {
            Some(JavaFramework::SpringBoot) => {
                format!("CMD java -Dserver.port=$PORT -jar {}", self.jar_glob())
            }
            None => format!("CMD java -jar {}", self.jar_glob()),
        }
    }
}

pub struct JavaGenerator;

impl Generator for JavaGenerator {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Java
    }

    fn defaults(&self) -> &'static MetaDefaults {
        &DEFAULTS
    }

    fn generate(&self, meta: &PlanMeta) -> String {
        let build = JavaBuild::from_meta(meta);

        let stage = match build.project_type {
            JavaProjectType::Maven => format!(
                "FROM docker.io/library/openjdk:{jdk}-jdk-slim\n\
                 RUN apt-get update && apt-get install -y maven\n\
                 WORKDIR /src\n\
                 COPY . .\n\
                 RUN mvn clean dependency:list install\n",
                jdk = build.jdk
            ),
            JavaProjectType::Gradle => format!(
                "FROM docker.io/library/gradle:8.1.0-jdk{jdk}-alpine\n\
                 WORKDIR /src\n\
                 COPY . .\n\
                 RUN gradle build\n",
                jdk = build.jdk
            ),
        };

        stage + &build.start_cmd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> PlanMeta {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_maven_plain() {
        let dockerfile = JavaGenerator.generate(&meta(&[("type", "maven"), ("jdk", "11")]));
        assert_eq!(
            dockerfile,
            "FROM docker.io/library/openjdk:11-jdk-slim
RUN apt-get update && apt-get install -y maven
WORKDIR /src
COPY . .
RUN mvn clean dependency:list install
CMD java -jar target/*.jar"
        );
    }

    #[test]
    fn test_gradle_spring_boot() {
        let dockerfile = JavaGenerator.generate(&meta(&[
            ("type", "gradle"),
            ("framework", "springboot"),
            ("jdk", "17"),
        ]));
        assert_eq!(
            dockerfile,
            "FROM docker.io/library/gradle:8.1.0-jdk17-alpine
WORKDIR /src
COPY . .
RUN gradle build
CMD java -Dserver.port=$PORT -jar build/libs/*.jar"
        );
    }

    #[test]
    fn test_defaults() {
        let dockerfile = JavaGenerator.generate(&PlanMeta::new());
        assert!(dockerfile.starts_with("FROM docker.io/library/openjdk:17-jdk-slim\n"));
        assert!(dockerfile.ends_with("CMD java -jar target/*.jar"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_maven() {
        let build_meta = meta(&[("type", "ant")]);
        let build = JavaBuild::from_meta(&build_meta);
        assert_eq!(build.project_type, JavaProjectType::Maven);
        assert_eq!(
            JavaGenerator.generate(&build_meta),
            JavaGenerator.generate(&meta(&[("type", "maven")]))
        );
    }

    #[test]
    fn test_unknown_framework_is_plain() {
        let build_meta = meta(&[("framework", "quarkus")]);
        let build = JavaBuild::from_meta(&build_meta);
        assert_eq!(build.framework, None);
    }
}
