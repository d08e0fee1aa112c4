use crate::plan::Ecosystem;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Plan a container build for a source project
#[derive(Parser, Debug)]
#[command(
    name = "planbox",
    about = "Plan a container build for a source project",
    version,
    author,
    long_about = "planbox inspects a project directory, infers its ecosystem and framework, \
                  and prints a Dockerfile that builds and runs it. Supported ecosystems: \
                  python, java, nodejs, static."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        ignore_case = true,
        help = "Set logging level"
    )]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect a project and generate its Dockerfile",
        long_about = "Reads marker files in the project to build plan metadata, then renders \
                      it into a Dockerfile.\n\n\
                      Examples:\n  \
                      planbox plan\n  \
                      planbox plan /path/to/repo\n  \
                      planbox plan --ecosystem python --format json"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Render a Dockerfile from plan metadata",
        long_about = "Skips detection and renders the given metadata directly.\n\n\
                      Examples:\n  \
                      planbox generate --ecosystem java --set type=gradle --set jdk=17\n  \
                      planbox generate --ecosystem nodejs --meta meta.json"
    )]
    Generate(GenerateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to project (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'e',
        long,
        value_name = "ECOSYSTEM",
        help = "Skip ecosystem detection (python, java, nodejs, static)"
    )]
    pub ecosystem: Option<Ecosystem>,

    #[arg(short = 'f', long, value_enum, help = "Output format [default: dockerfile]")]
    pub format: Option<OutputFormatArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(short = 'e', long, value_name = "ECOSYSTEM", help = "Target ecosystem")]
    pub ecosystem: Ecosystem,

    #[arg(
        short = 'm',
        long,
        value_name = "FILE",
        help = "JSON object of plan metadata (string values only)"
    )]
    pub meta: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a metadata key; applied after --meta, may be repeated"
    )]
    pub overrides: Vec<String>,

    #[arg(short = 'f', long, value_enum, help = "Output format [default: dockerfile]")]
    pub format: Option<OutputFormatArg>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Dockerfile,
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Dockerfile => super::output::OutputFormat::Dockerfile,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_plan_args() {
        let args = CliArgs::parse_from(["planbox", "plan"]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert!(plan_args.repository_path.is_none());
                assert!(plan_args.ecosystem.is_none());
                assert!(plan_args.format.is_none());
                assert!(plan_args.output.is_none());
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_plan_with_options() {
        let args = CliArgs::parse_from([
            "planbox",
            "plan",
            "/tmp/repo",
            "--ecosystem",
            "node",
            "--format",
            "yaml",
        ]);
        match args.command {
            Commands::Plan(plan_args) => {
                assert_eq!(plan_args.repository_path, Some(PathBuf::from("/tmp/repo")));
                assert_eq!(plan_args.ecosystem, Some(Ecosystem::NodeJs));
                assert_eq!(plan_args.format, Some(OutputFormatArg::Yaml));
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_invalid_ecosystem() {
        let result = CliArgs::try_parse_from(["planbox", "plan", "--ecosystem", "cobol"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_overrides() {
        let args = CliArgs::parse_from([
            "planbox",
            "generate",
            "-e",
            "java",
            "--set",
            "type=gradle",
            "--set",
            "jdk=21",
        ]);
        match args.command {
            Commands::Generate(generate_args) => {
                assert_eq!(generate_args.ecosystem, Ecosystem::Java);
                assert_eq!(generate_args.overrides, vec!["type=gradle", "jdk=21"]);
                assert!(generate_args.meta.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_ecosystem() {
        assert!(CliArgs::try_parse_from(["planbox", "generate"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["planbox", "plan", "-v", "--log-level", "trace"]);
        assert!(args.verbose);
        assert_eq!(args.log_level.as_deref(), Some("trace"));

        assert!(CliArgs::try_parse_from(["planbox", "plan", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_log_level_restricted() {
        let err = CliArgs::try_parse_from(["planbox", "plan", "--log-level", "bogus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        let args = CliArgs::parse_from(["planbox", "generate", "-e", "java", "--log-level", "WARN"]);
        assert!(args.log_level.unwrap().eq_ignore_ascii_case("warn"));
    }
}
