//! Output formatting for plan results
//!
//! `dockerfile` prints only the generated Dockerfile. `json` and `yaml`
//! serialize the whole [`PlanOutput`]; `human` adds a short summary.

use crate::pipeline::PlanOutput;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::str::FromStr;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw Dockerfile text
    Dockerfile,
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Summary followed by the Dockerfile
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dockerfile" => Ok(Self::Dockerfile),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "human" => Ok(Self::Human),
            _ => Err(format!(
                "Invalid format: {}. Valid options: dockerfile, json, yaml, human",
                s
            )),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, output: &PlanOutput) -> Result<String> {
        match self.format {
            OutputFormat::Dockerfile => Ok(with_trailing_newline(&output.dockerfile)),
            OutputFormat::Json => serde_json::to_string_pretty(output)
                .map(|s| with_trailing_newline(&s))
                .context("Failed to serialize plan to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(output).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(output)),
        }
    }

    fn format_human(&self, output: &PlanOutput) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Ecosystem: {}", output.ecosystem);

        if output.meta.is_empty() {
            let _ = writeln!(text, "Metadata:  (none)");
        } else {
            let _ = writeln!(text, "Metadata:");
            let width = output.meta.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, value) in output.meta.iter() {
                let _ = writeln!(text, "  {:width$}  {}", key, value, width = width);
            }
        }

        let _ = writeln!(text);
        let _ = writeln!(text, "Dockerfile:");
        let _ = writeln!(text, "{}", "-".repeat(40));
        text.push_str(&with_trailing_newline(&output.dockerfile));
        text
    }
}

fn with_trailing_newline(s: &str) -> String {
    if s.ends_with('\n') {
        s.to_string()
    } else {
        format!("{}\n", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Ecosystem;

    fn sample() -> PlanOutput {
        PlanOutput {
            ecosystem: Ecosystem::Python,
            meta: [("install", "pip install -r requirements.txt"), ("start", "python main.py")]
                .into_iter()
                .collect(),
            dockerfile: "FROM python\nCMD python main.py".to_string(),
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_dockerfile_format() {
        let text = OutputFormatter::new(OutputFormat::Dockerfile)
            .format(&sample())
            .unwrap();
        assert_eq!(text, "FROM python\nCMD python main.py\n");
    }

    #[test]
    fn test_json_format() {
        let text = OutputFormatter::new(OutputFormat::Json)
            .format(&sample())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ecosystem"], "python");
        assert_eq!(value["meta"]["start"], "python main.py");
    }

    #[test]
    fn test_yaml_roundtrips() {
        let text = OutputFormatter::new(OutputFormat::Yaml)
            .format(&sample())
            .unwrap();
        let parsed: PlanOutput = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_human_format() {
        let text = OutputFormatter::new(OutputFormat::Human)
            .format(&sample())
            .unwrap();
        assert!(text.starts_with("Ecosystem: python\n"));
        assert!(text.contains("  start    python main.py\n"));
        assert!(text.ends_with("CMD python main.py\n"));
    }
}
