pub mod commands;
pub mod output;

pub use commands::{CliArgs, Commands, GenerateArgs, OutputFormatArg, PlanArgs};
pub use output::{OutputFormat, OutputFormatter};
