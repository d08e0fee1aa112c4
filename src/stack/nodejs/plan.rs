//! Node.js project detection

use crate::fs::FileSystem;
use crate::plan::{Ecosystem, PlanMeta, Planner};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

crate::define_tag_enum! {
    /// Node.js package manager
    PackageManager: "package manager" {
        Npm => "npm",
        Yarn => "yarn",
        Pnpm => "pnpm",
    }
}

crate::define_tag_enum! {
    /// Node.js application framework
    NodeFramework: "node framework" {
        Astro => "astro",
        Vitepress => "vitepress",
        Hexo => "hexo",
        NuxtJs => "nuxt.js",
        NextJs => "next.js",
        NestJs => "nest.js",
        Remix => "remix",
        Umi => "umi",
        VueCli => "vue-cli",
        CreateReactApp => "create-react-app",
        Vite => "vite",
    }
}

/// Lockfiles in priority order
pub const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

/// Dependency → framework rules, first match wins. Meta-frameworks come
/// before the bundlers they are built on.
pub const FRAMEWORK_RULES: &[(&str, NodeFramework)] = &[
    ("astro", NodeFramework::Astro),
    ("vitepress", NodeFramework::Vitepress),
    ("hexo", NodeFramework::Hexo),
    ("nuxt", NodeFramework::NuxtJs),
    ("next", NodeFramework::NextJs),
    ("@nestjs/core", NodeFramework::NestJs),
    ("@remix-run/node", NodeFramework::Remix),
    ("umi", NodeFramework::Umi),
    ("@vue/cli-service", NodeFramework::VueCli),
    ("react-scripts", NodeFramework::CreateReactApp),
    ("vite", NodeFramework::Vite),
];

const NODE_VERSION_FILES: [&str; 2] = [".nvmrc", ".node-version"];

/// The parts of `package.json` the planner reads. A field holding `null` or a
/// value of the wrong type reads as empty instead of rejecting the manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scripts: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub engines: BTreeMap<String, serde_json::Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl PackageJson {
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

/// First major version number in a semver range such as `>=18.0.0` or `v20`
pub fn major_version(spec: &str) -> Option<String> {
    static MAJOR: OnceLock<Option<Regex>> = OnceLock::new();
    let re = MAJOR.get_or_init(|| Regex::new(r"(\d+)").ok()).as_ref()?;
    re.captures(spec)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Per-invocation detection state for one Node.js project
pub struct NodePlanContext<'a> {
    fs: &'a dyn FileSystem,
    package_json: OnceCell<Option<PackageJson>>,
    package_manager: OnceCell<Option<PackageManager>>,
    framework: OnceCell<Option<NodeFramework>>,
}

impl<'a> NodePlanContext<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            package_json: OnceCell::new(),
            package_manager: OnceCell::new(),
            framework: OnceCell::new(),
        }
    }

    pub fn package_json(&self) -> Option<&PackageJson> {
        self.package_json
            .get_or_init(|| {
                let content = self
                    .fs
                    .read_to_string(Path::new("package.json"))
                    .map_err(|e| trace!(error = %e, "No readable package.json"))
                    .ok()?;
                serde_json::from_str(&content)
                    .map_err(|e| debug!(error = %e, "Ignoring unparseable package.json"))
                    .ok()
            })
            .as_ref()
    }

    pub fn determine_package_manager(&self) -> Option<PackageManager> {
        *self.package_manager.get_or_init(|| {
            let found = LOCKFILES
                .iter()
                .find(|(file, _)| self.fs.exists(Path::new(file)))
                .map(|(_, pm)| *pm);
            debug!(package_manager = ?found, "Node package manager");
            found
        })
    }

    pub fn determine_framework(&self) -> Option<NodeFramework> {
        *self.framework.get_or_init(|| {
            let package = self.package_json()?;
            let found = FRAMEWORK_RULES
                .iter()
                .find(|(dependency, _)| package.has_dependency(dependency))
                .map(|(_, framework)| *framework);
            debug!(framework = ?found, "Node framework");
            found
        })
    }

    pub fn determine_build_command(&self) -> Option<&'static str> {
        self.package_json()
            .filter(|p| p.has_script("build"))
            .map(|_| "build")
    }

    pub fn determine_start_command(&self) -> Option<&'static str> {
        self.package_json()
            .filter(|p| p.has_script("start"))
            .map(|_| "start")
    }

    pub fn determine_main_file(&self) -> Option<&str> {
        self.package_json()?
            .main
            .as_deref()
            .filter(|main| !main.is_empty())
    }

    /// Major Node.js version from `engines.node`, then `.nvmrc` / `.node-version`
    pub fn determine_node_version(&self) -> Option<String> {
        let from_engines = self
            .package_json()
            .and_then(|p| p.engines.get("node"))
            .and_then(|v| v.as_str())
            .and_then(major_version);
        if from_engines.is_some() {
            return from_engines;
        }

        NODE_VERSION_FILES.iter().find_map(|file| {
            self.fs
                .read_to_string(Path::new(file))
                .ok()
                .and_then(|content| major_version(content.trim()))
        })
    }

    pub fn need_puppeteer(&self) -> bool {
        self.package_json()
            .map(|p| p.has_dependency("puppeteer"))
            .unwrap_or(false)
    }
}

pub struct NodePlanner;

impl Planner for NodePlanner {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::NodeJs
    }

    fn plan(&self, fs: &dyn FileSystem) -> PlanMeta {
        let ctx = NodePlanContext::new(fs);
        let mut meta = PlanMeta::new();

        if let Some(pm) = ctx.determine_package_manager() {
            meta.insert("packageManager", pm.as_str());
        }
        if let Some(framework) = ctx.determine_framework() {
            meta.insert("framework", framework.as_str());
        }
        if let Some(build) = ctx.determine_build_command() {
            meta.insert("buildCommand", build);
        }
        if let Some(start) = ctx.determine_start_command() {
            meta.insert("startCommand", start);
        }
        if let Some(main) = ctx.determine_main_file() {
            meta.insert("mainFile", main);
        }
        if let Some(version) = ctx.determine_node_version() {
            meta.insert("nodeVersion", version);
        }
        if ctx.need_puppeteer() {
            meta.insert("needPuppeteer", "true");
        }

        meta
    }
}
