//! Assembles Python detection results into plan metadata

use super::context::{has_dependency, PythonFramework, PythonPlanContext};
use crate::fs::FileSystem;
use crate::plan::{Ecosystem, PlanMeta, Planner};
use tracing::debug;

/// Port the generated start commands bind to
pub const PORT: u16 = 8080;

/// System packages needed to build native database drivers, first match wins
const APT_RULES: &[(&str, &[&str])] = &[
    ("mysqlclient", &["libmariadb-dev", "build-essential"]),
    ("psycopg2", &["libpq-dev"]),
];

pub struct PythonPlanner;

impl Planner for PythonPlanner {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    fn plan(&self, fs: &dyn FileSystem) -> PlanMeta {
        let ctx = PythonPlanContext::new(fs);
        assemble(&ctx)
    }
}

/// Builds the metadata record from an existing detection context
pub fn assemble(ctx: &PythonPlanContext) -> PlanMeta {
    let mut meta = PlanMeta::new();

    if let Some(framework) = ctx.determine_framework() {
        meta.insert("framework", framework.as_str());
    }

    meta.insert("install", determine_install_cmd(ctx));
    meta.insert("start", determine_start_cmd(ctx));

    let apt_deps = determine_apt_dependencies(ctx);
    if !apt_deps.is_empty() {
        meta.insert("apt-deps", apt_deps.join(" "));
    }

    debug!(keys = meta.len(), "Assembled Python plan");
    meta
}

/// Install command keyed by the manifest actually present. A project with no
/// manifest gets the placeholder even though its policy reports the
/// `requirements.txt` fallback.
pub fn determine_install_cmd(ctx: &PythonPlanContext) -> String {
    let policy = ctx.detected_dependency_file().unwrap_or_default();
    let has_wsgi = !ctx.determine_wsgi().is_empty();
    let is_fastapi = ctx.determine_framework() == Some(PythonFramework::FastApi);

    let cmd = match (policy, has_wsgi, is_fastapi) {
        ("requirements.txt", true, _) => "pip install -r requirements.txt && pip install gunicorn",
        ("requirements.txt", false, true) => {
            "pip install -r requirements.txt && pip install uvicorn"
        }
        ("requirements.txt", false, false) => "pip install -r requirements.txt",
        ("Pipfile", true, _) => "pipenv install && pipenv install gunicorn",
        ("Pipfile", false, _) => "pipenv install",
        ("pyproject.toml", true, _) => "poetry install && poetry install gunicorn",
        ("pyproject.toml", false, _) => "poetry install",
        (_, true, _) => "pip install gunicorn",
        (_, false, _) => "echo \"skip install\"",
    };
    cmd.to_string()
}

pub fn determine_start_cmd(ctx: &PythonPlanContext) -> String {
    let wsgi = ctx.determine_wsgi();
    if wsgi.is_empty() {
        return format!("python {}", ctx.determine_entry());
    }

    match ctx.determine_framework() {
        Some(PythonFramework::FastApi) => {
            format!("uvicorn {} --host 0.0.0.0 --port {}", wsgi, PORT)
        }
        _ => format!("gunicorn --bind :{} {}", PORT, wsgi),
    }
}

pub fn determine_apt_dependencies(ctx: &PythonPlanContext) -> Vec<&'static str> {
    APT_RULES
        .iter()
        .find(|(dependency, _)| has_dependency(ctx.fs(), &[*dependency]))
        .map(|(_, packages)| packages.to_vec())
        .unwrap_or_default()
}
