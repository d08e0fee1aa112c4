use planbox::cli::commands::{CliArgs, Commands, GenerateArgs, PlanArgs};
use planbox::cli::output::{OutputFormat, OutputFormatter};
use planbox::fs::RealFileSystem;
use planbox::pipeline::{PipelineOrchestrator, PlanOutput};
use planbox::plan::PlanMeta;
use planbox::util::logging::{init_logging, parse_level, LoggingConfig};
use planbox::{PlanboxConfig, NAME, VERSION};

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, info, Level};

fn main() {
    let args = CliArgs::parse();

    let config = match PlanboxConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("\nPlease check your PLANBOX_* environment variables.");
            process::exit(1);
        }
    };
    init_logging_from_args(&args, &config);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Plan(plan_args) => handle_plan(plan_args, &config, args.quiet),
        Commands::Generate(generate_args) => handle_generate(generate_args, &config, args.quiet),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &PlanboxConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from_config(config)
    });
}

fn handle_plan(args: &PlanArgs, config: &PlanboxConfig, quiet: bool) -> i32 {
    let repo_path = match &args.repository_path {
        Some(path) => path.clone(),
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return 1;
            }
        },
    };
    debug!("Repository path: {}", repo_path.display());

    if !repo_path.exists() {
        error!("Repository path does not exist: {}", repo_path.display());
        return 1;
    }

    if !repo_path.is_dir() {
        error!(
            "Repository path is not a directory: {}",
            repo_path.display()
        );
        return 1;
    }

    let repo_path: PathBuf = match repo_path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to canonicalize repository path: {}", e);
            return 1;
        }
    };

    info!("Analyzing repository: {}", repo_path.display());
    let fs = RealFileSystem::new(repo_path);
    let output = match PipelineOrchestrator::default().execute(&fs, args.ecosystem) {
        Ok(output) => output,
        Err(e) => {
            error!("Planning failed: {}", e);
            return 1;
        }
    };

    let format = args.format.map(OutputFormat::from).unwrap_or(config.format);
    emit(&output, format, args.output.as_deref(), quiet)
}

fn handle_generate(args: &GenerateArgs, config: &PlanboxConfig, quiet: bool) -> i32 {
    let mut meta = match &args.meta {
        Some(path) => match load_meta(path) {
            Ok(meta) => meta,
            Err(e) => {
                error!("{:#}", e);
                return 1;
            }
        },
        None => PlanMeta::new(),
    };

    for assignment in &args.overrides {
        if let Err(e) = meta.apply_override(assignment) {
            error!("{}", e);
            return 1;
        }
    }
    debug!(keys = meta.len(), "Loaded plan metadata");

    let orchestrator = PipelineOrchestrator::default();
    let dockerfile = match orchestrator.render(args.ecosystem, &meta) {
        Ok(dockerfile) => dockerfile,
        Err(e) => {
            error!("Generation failed: {}", e);
            return 1;
        }
    };

    let output = PlanOutput {
        ecosystem: args.ecosystem,
        meta,
        dockerfile,
    };
    let format = args.format.map(OutputFormat::from).unwrap_or(config.format);
    emit(&output, format, args.output.as_deref(), quiet)
}

fn load_meta(path: &Path) -> Result<PlanMeta> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file {}", path.display()))?;
    PlanMeta::from_json(&content)
        .with_context(|| format!("Invalid metadata file {}", path.display()))
}

fn emit(output: &PlanOutput, format: OutputFormat, destination: Option<&Path>, quiet: bool) -> i32 {
    let text = match OutputFormatter::new(format).format(output) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to format output: {}", e);
            return 1;
        }
    };

    if let Some(output_file) = destination {
        match fs::write(output_file, &text) {
            Ok(_) => {
                info!("Output written to: {}", output_file.display());
                if !quiet {
                    eprintln!("Output written to: {}", output_file.display());
                }
            }
            Err(e) => {
                error!("Failed to write output to file: {}", e);
                return 1;
            }
        }
    } else {
        print!("{}", text);
    }

    0
}
