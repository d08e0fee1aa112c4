//! Java project detection (Maven / Gradle, Spring Boot, JDK version)

use crate::fs::FileSystem;
use crate::plan::{Ecosystem, PlanMeta, Planner};
use regex::Regex;
use roxmltree::Document;
use std::cell::OnceCell;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

crate::define_tag_enum! {
    /// Build tool driving a Java project
    JavaProjectType: "java project type" {
        Maven => "maven",
        Gradle => "gradle",
    }
}

crate::define_tag_enum! {
    /// Java application framework
    JavaFramework: "java framework" {
        SpringBoot => "springboot" | "spring-boot",
    }
}

/// Build files in priority order, with the build tool they imply
pub const BUILD_FILES: &[(&str, JavaProjectType)] = &[
    ("pom.xml", JavaProjectType::Maven),
    ("build.gradle", JavaProjectType::Gradle),
    ("build.gradle.kts", JavaProjectType::Gradle),
];

/// Build-file markers for Spring Boot, per build tool
const SPRING_BOOT_MARKERS: &[(JavaProjectType, &str)] = &[
    (JavaProjectType::Maven, "spring-boot"),
    (JavaProjectType::Gradle, "org.springframework.boot"),
];

/// `pom.xml` properties naming the Java release, in priority order
const POM_VERSION_PROPERTIES: [&str; 4] = [
    "java.version",
    "maven.compiler.release",
    "maven.compiler.source",
    "maven.compiler.target",
];

const GRADLE_VERSION_PATTERNS: [&str; 2] = [
    r#"languageVersion(?:\.set)?\s*[=(]\s*JavaLanguageVersion\.of\((\d+)\)"#,
    r#"sourceCompatibility\s*=\s*(?:JavaVersion\.VERSION_)?["']?(1[._]\d+|\d+)"#,
];

/// Per-invocation detection state for one Java project
pub struct JavaPlanContext<'a> {
    fs: &'a dyn FileSystem,
    build_file: OnceCell<Option<(&'static str, JavaProjectType)>>,
    build_script: OnceCell<Option<String>>,
    framework: OnceCell<Option<JavaFramework>>,
    jdk: OnceCell<Option<String>>,
}

impl<'a> JavaPlanContext<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            build_file: OnceCell::new(),
            build_script: OnceCell::new(),
            framework: OnceCell::new(),
            jdk: OnceCell::new(),
        }
    }

    pub fn determine_project_type(&self) -> Option<JavaProjectType> {
        self.build_file().map(|(_, project_type)| project_type)
    }

    fn build_file(&self) -> Option<(&'static str, JavaProjectType)> {
        *self.build_file.get_or_init(|| {
            let found = BUILD_FILES
                .iter()
                .copied()
                .find(|(file, _)| self.fs.exists(Path::new(file)));
            debug!(build_file = ?found.map(|(f, _)| f), "Java build file");
            found
        })
    }

    fn build_script(&self) -> Option<&str> {
        self.build_script
            .get_or_init(|| {
                let (file, _) = self.build_file()?;
                self.fs
                    .read_to_string(Path::new(file))
                    .map_err(|e| trace!(file, error = %e, "Cannot read build file"))
                    .ok()
            })
            .as_deref()
    }

    pub fn determine_framework(&self) -> Option<JavaFramework> {
        *self.framework.get_or_init(|| {
            let project_type = self.determine_project_type()?;
            let script = self.build_script()?;
            let is_spring_boot = SPRING_BOOT_MARKERS
                .iter()
                .any(|(tool, marker)| *tool == project_type && script.contains(marker));
            let framework = is_spring_boot.then_some(JavaFramework::SpringBoot);
            debug!(framework = ?framework, "Java framework");
            framework
        })
    }

    /// Major JDK version declared by the build file, if any
    pub fn determine_jdk(&self) -> Option<&str> {
        self.jdk
            .get_or_init(|| {
                let project_type = self.determine_project_type()?;
                let script = self.build_script()?;
                let version = match project_type {
                    JavaProjectType::Maven => parse_pom_java_version(script),
                    JavaProjectType::Gradle => parse_gradle_java_version(script),
                }
                .map(|v| normalize_java_version(&v));
                debug!(jdk = ?version, "Java version");
                version
            })
            .as_deref()
    }
}

pub fn parse_pom_java_version(content: &str) -> Option<String> {
    let doc = Document::parse(content)
        .map_err(|e| trace!(error = %e, "Invalid pom.xml"))
        .ok()?;

    POM_VERSION_PROPERTIES.iter().find_map(|property| {
        doc.descendants()
            .filter(|node| node.has_tag_name(*property))
            .find_map(|node| node.text())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty() && !text.starts_with("${"))
    })
}

fn gradle_version_regexes() -> &'static [Regex] {
    static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        GRADLE_VERSION_PATTERNS
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect()
    })
}

pub fn parse_gradle_java_version(content: &str) -> Option<String> {
    gradle_version_regexes().iter().find_map(|re| {
        re.captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// `1.8` and `1_8` become `8`; anything else is returned unchanged
pub fn normalize_java_version(version: &str) -> String {
    version
        .strip_prefix("1.")
        .or_else(|| version.strip_prefix("1_"))
        .unwrap_or(version)
        .to_string()
}

pub struct JavaPlanner;

impl Planner for JavaPlanner {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Java
    }

    fn plan(&self, fs: &dyn FileSystem) -> PlanMeta {
        let ctx = JavaPlanContext::new(fs);
        let mut meta = PlanMeta::new();

        if let Some(project_type) = ctx.determine_project_type() {
            meta.insert("type", project_type.as_str());
        }
        if let Some(framework) = ctx.determine_framework() {
            meta.insert("framework", framework.as_str());
        }
        if let Some(jdk) = ctx.determine_jdk() {
            meta.insert("jdk", jdk);
        }

        meta
    }
}
