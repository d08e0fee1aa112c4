//! Python project detection
//!
//! All facts live on [`PythonPlanContext`] and are computed lazily, at most once
//! per context. Probes that fail to read a file fall through to the next rule or
//! to a fixed default; nothing here returns an error.

use crate::fs::FileSystem;
use regex::Regex;
use std::cell::OnceCell;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

crate::define_tag_enum! {
    /// Python web framework
    PythonFramework: "python framework" {
        Django => "django",
        Flask => "flask",
        FastApi => "fastapi",
    }
}

pub const REQUIREMENTS_TXT: &str = "requirements.txt";

/// Entry file candidates, in priority order
pub const ENTRY_CANDIDATES: [&str; 3] = ["main.py", "app.py", "manage.py"];
pub const DEFAULT_ENTRY: &str = "main.py";

/// Dependency manifests, in priority order
pub const DEPENDENCY_FILES: [&str; 3] = [REQUIREMENTS_TXT, "Pipfile", "pyproject.toml"];
pub const DEFAULT_DEPENDENCY_FILE: &str = REQUIREMENTS_TXT;

/// Files scanned by [`has_dependency`]
pub const DEPENDENCY_SCAN_FILES: [&str; 5] = [
    REQUIREMENTS_TXT,
    "Pipfile",
    "pyproject.toml",
    "Pipfile.lock",
    "poetry.lock",
];

/// Case-insensitive substring check used for lightweight manifest scanning.
///
/// Both sides are ASCII-lowercased; there is no word-boundary handling, so
/// `flask` also matches `flask-cors`.
pub fn weak_contains(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

/// Inputs available to a framework rule
pub struct FrameworkProbe<'a> {
    pub requirements: &'a str,
    pub fs: &'a dyn FileSystem,
}

/// One ordered detection rule: the first rule whose predicate holds wins
pub struct FrameworkRule {
    pub framework: PythonFramework,
    pub reason: &'static str,
    pub matches: fn(&FrameworkProbe) -> bool,
}

fn requires_django(probe: &FrameworkProbe) -> bool {
    weak_contains(probe.requirements, "django")
}

fn has_manage_py(probe: &FrameworkProbe) -> bool {
    probe.fs.exists(Path::new("manage.py"))
}

fn requires_flask(probe: &FrameworkProbe) -> bool {
    weak_contains(probe.requirements, "flask")
}

fn requires_fastapi(probe: &FrameworkProbe) -> bool {
    weak_contains(probe.requirements, "fastapi")
}

pub static FRAMEWORK_RULES: &[FrameworkRule] = &[
    FrameworkRule {
        framework: PythonFramework::Django,
        reason: "requirements.txt mentions django",
        matches: requires_django,
    },
    FrameworkRule {
        framework: PythonFramework::Django,
        reason: "manage.py present",
        matches: has_manage_py,
    },
    FrameworkRule {
        framework: PythonFramework::Flask,
        reason: "requirements.txt mentions flask",
        matches: requires_flask,
    },
    FrameworkRule {
        framework: PythonFramework::FastApi,
        reason: "requirements.txt mentions fastapi",
        matches: requires_fastapi,
    },
];

/// Returns true if any of `dependencies` appears verbatim in any recognized
/// manifest or lock file.
pub fn has_dependency(fs: &dyn FileSystem, dependencies: &[&str]) -> bool {
    DEPENDENCY_SCAN_FILES.iter().any(|file| {
        let Ok(content) = fs.read_to_string(Path::new(file)) else {
            return false;
        };
        dependencies.iter().any(|dep| content.contains(dep))
    })
}

/// Per-invocation detection state for one Python project
pub struct PythonPlanContext<'a> {
    fs: &'a dyn FileSystem,
    framework: OnceCell<Option<PythonFramework>>,
    entry: OnceCell<&'static str>,
    dependency_file: OnceCell<Option<&'static str>>,
    wsgi: OnceCell<String>,
}

impl<'a> PythonPlanContext<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            framework: OnceCell::new(),
            entry: OnceCell::new(),
            dependency_file: OnceCell::new(),
            wsgi: OnceCell::new(),
        }
    }

    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Framework classification; `None` when nothing matched or
    /// `requirements.txt` is unreadable
    pub fn determine_framework(&self) -> Option<PythonFramework> {
        *self.framework.get_or_init(|| self.detect_framework())
    }

    fn detect_framework(&self) -> Option<PythonFramework> {
        let requirements = match self.fs.read_to_string(Path::new(REQUIREMENTS_TXT)) {
            Ok(content) => content,
            Err(e) => {
                trace!(error = %e, "No readable requirements.txt");
                debug!("Python framework: none (no requirements.txt)");
                return None;
            }
        };

        let probe = FrameworkProbe {
            requirements: &requirements,
            fs: self.fs,
        };

        let matched = FRAMEWORK_RULES.iter().find(|rule| (rule.matches)(&probe));
        match matched {
            Some(rule) => {
                debug!(framework = %rule.framework, reason = rule.reason, "Python framework detected");
                Some(rule.framework)
            }
            None => {
                debug!("Python framework: none");
                None
            }
        }
    }

    /// File the interpreter runs; defaults to `main.py` even if absent
    pub fn determine_entry(&self) -> &'static str {
        *self.entry.get_or_init(|| {
            let entry = first_existing(self.fs, &ENTRY_CANDIDATES).unwrap_or(DEFAULT_ENTRY);
            debug!(entry, "Python entry file");
            entry
        })
    }

    /// Manifest governing dependency installation; `requirements.txt` when
    /// none is present
    pub fn determine_dependency_policy(&self) -> &'static str {
        self.detected_dependency_file().unwrap_or(DEFAULT_DEPENDENCY_FILE)
    }

    /// Manifest actually found on disk, if any
    pub fn detected_dependency_file(&self) -> Option<&'static str> {
        *self.dependency_file.get_or_init(|| {
            let file = first_existing(self.fs, &DEPENDENCY_FILES);
            debug!(file = ?file, "Python dependency manifest");
            file
        })
    }

    /// WSGI/ASGI application reference, or an empty string when there is none
    pub fn determine_wsgi(&self) -> &str {
        self.wsgi.get_or_init(|| {
            let wsgi = match self.determine_framework() {
                Some(PythonFramework::Django) => self.django_wsgi_module(),
                Some(PythonFramework::Flask) => self.app_object("Flask"),
                Some(PythonFramework::FastApi) => self.app_object("FastAPI"),
                None => None,
            }
            .unwrap_or_default();
            debug!(wsgi = %wsgi, "Python web application reference");
            wsgi
        })
    }

    /// First root directory containing `wsgi.py`, as `<dir>.wsgi`
    fn django_wsgi_module(&self) -> Option<String> {
        let entries = self
            .fs
            .read_dir(Path::new(""))
            .map_err(|e| trace!(error = %e, "Cannot list project root"))
            .ok()?;

        entries
            .iter()
            .filter(|entry| entry.is_dir())
            .find(|entry| {
                self.fs
                    .exists(&Path::new(entry.file_name()).join("wsgi.py"))
            })
            .map(|entry| format!("{}.wsgi", entry.file_name()))
    }

    /// Finds `<ident> = <constructor>(...)` in the entry file.
    ///
    /// Best effort: an aliased import (`from flask import Flask as F`) or a
    /// call whose arguments contain a `)` is not recognized.
    fn app_object(&self, constructor: &str) -> Option<String> {
        let entry = self.determine_entry();
        let content = self
            .fs
            .read_to_string(Path::new(entry))
            .map_err(|e| trace!(entry, error = %e, "Cannot read entry file"))
            .ok()?;

        let re = app_object_regex(constructor)?;
        let ident = re.captures(&content)?.get(1)?.as_str();
        let module = entry.replacen(".py", "", 1);
        Some(format!("{}:{}", module, ident))
    }
}

/// Constructors whose assignment names the application object
const APP_CONSTRUCTORS: [&str; 2] = ["Flask", "FastAPI"];

fn app_object_regex(constructor: &str) -> Option<&'static Regex> {
    static REGEXES: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    REGEXES
        .get_or_init(|| {
            APP_CONSTRUCTORS
                .iter()
                .filter_map(|ctor| {
                    Regex::new(&format!(r"(\w+)\s*=\s*{}\([^)]*\)", ctor))
                        .ok()
                        .map(|re| (*ctor, re))
                })
                .collect()
        })
        .iter()
        .find(|(ctor, _)| *ctor == constructor)
        .map(|(_, re)| re)
}

fn first_existing(fs: &dyn FileSystem, candidates: &[&'static str]) -> Option<&'static str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| fs.exists(Path::new(candidate)))
}
