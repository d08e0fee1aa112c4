use thiserror::Error;

/// Errors raised while turning user input into plan inputs.
///
/// Detection itself never fails; these cover tag parsing and metadata
/// supplied from outside the planners.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unknown {kind}: {value}. Valid options: {valid}")]
    UnknownTag {
        kind: &'static str,
        value: String,
        valid: String,
    },

    #[error("Invalid override '{0}', expected KEY=VALUE")]
    InvalidOverride(String),

    #[error("Plan metadata must be a JSON object of string values: {0}")]
    InvalidMeta(String),
}
