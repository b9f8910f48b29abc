use super::DatabaseKind;
use thiserror::Error;

/// Rejected input. Raised before any runtime invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required option --{flag} for {kind}")]
    MissingOption { kind: DatabaseKind, flag: &'static str },

    #[error("option --{flag} is not accepted for {kind}")]
    UnexpectedOption { kind: DatabaseKind, flag: &'static str },

    #[error("option --{flag} must not be empty")]
    EmptyValue { flag: &'static str },

    #[error("invalid port: {value}. Must be 1-65535")]
    InvalidPort { value: String },

    #[error("invalid container name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid environment variable '{entry}': expected KEY=VALUE")]
    InvalidEnv { entry: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },
}
