//! Error types for the outreach generator.

use std::path::PathBuf;

/// Top-level error type for the generator.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Unknown category: {name} (available: {available})")]
    UnknownCategory { name: String, available: String },

    #[error("Failed to parse category set: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input row source errors.
///
/// These cover loading tabular data into rows. Bad *values* inside a row
/// are never an `InputError` — they surface later as per-row outcomes.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Input is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Failed to read input: {0}")]
    Read(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Template rendering errors.
///
/// All of these indicate a template/configuration bug, not a data problem:
/// they abort the whole run rather than being recorded as a row outcome.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template {name} is malformed: {reason}")]
    Syntax { name: String, reason: String },

    #[error("Rendering {name} failed: {reason}")]
    Render { name: String, reason: String },

    #[error("Unknown template variant: {key}")]
    UnknownVariant { key: String },
}

/// Artifact session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The artifact-creation capability could not be initialized.
    /// Fatal for the whole batch.
    #[error("Artifact session unavailable: {reason}")]
    Unavailable { reason: String },

    /// Creating one artifact failed. Caught per row, never fatal.
    #[error("Failed to create artifact at {}: {reason}", path.display())]
    ArtifactCreation { path: PathBuf, reason: String },
}

/// Result type alias for the generator.
pub type Result<T> = std::result::Result<T, Error>;
