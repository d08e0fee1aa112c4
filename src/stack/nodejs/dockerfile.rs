//! Dockerfile generation for Node.js projects
//!
//! Frameworks that compile to static files get a two-stage image that serves
//! the build output with nginx; everything else runs as a Node.js server.

use super::plan::{NodeFramework, PackageManager};
use crate::plan::{Ecosystem, Generator, MetaDefaults, PlanMeta};

pub static DEFAULTS: MetaDefaults = MetaDefaults::new(
    "nodejs",
    &[
        ("packageManager", ""),
        ("framework", ""),
        ("nodeVersion", "18"),
        ("buildCommand", ""),
        ("startCommand", ""),
        ("mainFile", ""),
        ("needPuppeteer", "false"),
    ],
);

/// Static-output framework and where its build lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticOutput {
    pub framework: NodeFramework,
    pub output_dir: &'static str,
    /// Unknown paths fall back to `index.html`
    pub single_page: bool,
}

/// Frameworks served as static files. Hexo, VitePress and Astro are always
/// treated as multi-page sites.
pub const STATIC_OUTPUTS: &[StaticOutput] = &[
    StaticOutput {
        framework: NodeFramework::Vite,
        output_dir: "dist",
        single_page: true,
    },
    StaticOutput {
        framework: NodeFramework::Umi,
        output_dir: "dist",
        single_page: true,
    },
    StaticOutput {
        framework: NodeFramework::CreateReactApp,
        output_dir: "build",
        single_page: true,
    },
    StaticOutput {
        framework: NodeFramework::VueCli,
        output_dir: "dist",
        single_page: true,
    },
    StaticOutput {
        framework: NodeFramework::Hexo,
        output_dir: "public",
        single_page: false,
    },
    StaticOutput {
        framework: NodeFramework::Vitepress,
        output_dir: "docs/.vitepress/dist",
        single_page: false,
    },
    StaticOutput {
        framework: NodeFramework::Astro,
        output_dir: "dist",
        single_page: false,
    },
];

const PUPPETEER_SETUP: &str = "
RUN apt-get update && apt-get install -y libnss3 libatk1.0-0 libatk-bridge2.0-0 libcups2 libgbm1 libasound2 libpangocairo-1.0-0 libxss1 libgtk-3-0 libxshmfence1 libglu1
RUN groupadd -r puppeteer 
RUN useradd -r -g puppeteer -G audio,video puppeteer
RUN chown -R puppeteer:puppeteer /src
RUN mkdir /home/puppeteer && chown -R puppeteer:puppeteer /home/puppeteer
USER puppeteer
";

const PUPPETEER_INSTALL: &str = "node node_modules/puppeteer/install.js && ";

/// Typed view over the keys the Node.js template reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBuild<'a> {
    /// `None` for a missing or unknown manager, rendered with yarn
    pub package_manager: Option<PackageManager>,
    pub framework: Option<NodeFramework>,
    pub node_version: &'a str,
    pub build_command: &'a str,
    pub start_command: &'a str,
    pub main_file: &'a str,
    pub need_puppeteer: bool,
}

impl<'a> NodeBuild<'a> {
    pub fn from_meta(meta: &'a PlanMeta) -> Self {
        meta.warn_unrecognized(&DEFAULTS);
        Self {
            package_manager: PackageManager::from_tag(meta.resolve("packageManager", &DEFAULTS)),
            framework: NodeFramework::from_tag(meta.resolve("framework", &DEFAULTS)),
            node_version: meta.resolve("nodeVersion", &DEFAULTS),
            build_command: meta.resolve("buildCommand", &DEFAULTS),
            start_command: meta.resolve("startCommand", &DEFAULTS),
            main_file: meta.resolve("mainFile", &DEFAULTS),
            need_puppeteer: meta.resolve("needPuppeteer", &DEFAULTS) == "true",
        }
    }

    pub fn static_output(&self) -> Option<&'static StaticOutput> {
        let framework = self.framework?;
        STATIC_OUTPUTS.iter().find(|s| s.framework == framework)
    }

    fn install_step(&self) -> &'static str {
        match self.package_manager {
            Some(PackageManager::Npm) => "RUN npm install",
            Some(PackageManager::Yarn) => "RUN yarn install",
            Some(PackageManager::Pnpm) => "\nRUN npm install -g pnpm\nRUN pnpm install\n",
            None => "RUN yarn",
        }
    }

    /// Empty when there is no build command
    fn build_step(&self) -> String {
        if self.build_command.is_empty() {
            return String::new();
        }
        match self.package_manager {
            Some(PackageManager::Npm) => format!("RUN npm run {}", self.build_command),
            Some(PackageManager::Pnpm) => format!("RUN pnpm run {}", self.build_command),
            Some(PackageManager::Yarn) | None => format!("RUN yarn {}", self.build_command),
        }
    }

    /// Start command without the `CMD` prefix
    fn start_command_line(&self) -> String {
        if self.start_command.is_empty() {
            return if !self.main_file.is_empty() {
                format!("node {}", self.main_file)
            } else if self.framework == Some(NodeFramework::NuxtJs) {
                "node .output/server/index.mjs".to_string()
            } else {
                "node index.js".to_string()
            };
        }
        match self.package_manager {
            Some(PackageManager::Npm) => format!("npm run {}", self.start_command),
            Some(PackageManager::Pnpm) => format!("pnpm {}", self.start_command),
            Some(PackageManager::Yarn) | None => format!("yarn {}", self.start_command),
        }
    }

    fn render_static(&self, output: &StaticOutput) -> String {
        let (target, server) = if output.single_page {
            (
                "/static",
                r#"server { listen 8080; root /static; location / {try_files \$uri /index.html; }}"#,
            )
        } else {
            (
                "/usr/share/nginx/html",
                "server { listen 8080; root /usr/share/nginx/html; }",
            )
        };

        format!(
            "FROM node:{version} as build\n\
             WORKDIR /src\n\
             COPY . .\n\
             {install}\n\
             {build}\n\
             \n\
             FROM nginx:alpine\n\
             COPY --from=build /src/{output_dir} {target}\n\
             RUN echo \"{server}\"> /etc/nginx/conf.d/default.conf\n\
             EXPOSE 8080\n",
            version = self.node_version,
            install = self.install_step(),
            build = self.build_step(),
            output_dir = output.output_dir,
            target = target,
            server = server,
        )
    }

    fn render_server(&self) -> String {
        let (puppeteer, start) = if self.need_puppeteer {
            (
                PUPPETEER_SETUP,
                format!("{}{}", PUPPETEER_INSTALL, self.start_command_line()),
            )
        } else {
            ("", self.start_command_line())
        };

        format!(
            "FROM node:{version} \n\
             ENV PORT=8080\n\
             WORKDIR /src\n\
             COPY . .\n\
             {install}\n\
             {build}\n\
             {puppeteer}\n\
             EXPOSE 8080\n\
             CMD {start}",
            version = self.node_version,
            install = self.install_step(),
            build = self.build_step(),
            puppeteer = puppeteer,
            start = start,
        )
    }
}

pub struct NodeGenerator;

impl Generator for NodeGenerator {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::NodeJs
    }

    fn defaults(&self) -> &'static MetaDefaults {
        &DEFAULTS
    }

    fn generate(&self, meta: &PlanMeta) -> String {
        let build = NodeBuild::from_meta(meta);
        match build.static_output() {
            Some(output) => build.render_static(output),
            None => build.render_server(),
        }
    }
}
