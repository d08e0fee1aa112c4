//! Plain static sites served by nginx

use crate::fs::FileSystem;
use crate::plan::{Ecosystem, Generator, MetaDefaults, PlanMeta, Planner};

pub static DEFAULTS: MetaDefaults = MetaDefaults::new("static", &[]);

const DOCKERFILE: &str = r#"FROM docker.io/library/nginx:alpine as runtime
WORKDIR /usr/share/nginx/html/static
COPY . .
RUN echo "server { listen 8080; root /usr/share/nginx/html/static; }"> /etc/nginx/conf.d/default.conf
EXPOSE 8080"#;

/// Static sites need no detection
pub struct StaticPlanner;

impl Planner for StaticPlanner {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Static
    }

    fn plan(&self, _fs: &dyn FileSystem) -> PlanMeta {
        PlanMeta::new()
    }
}

pub struct StaticGenerator;

impl Generator for StaticGenerator {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Static
    }

    fn defaults(&self) -> &'static MetaDefaults {
        &DEFAULTS
    }

    fn generate(&self, meta: &PlanMeta) -> String {
        meta.warn_unrecognized(&DEFAULTS);
        DOCKERFILE.to_string()
    }
}
