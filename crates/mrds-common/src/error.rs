//! Error types for the MRDS trend tooling.

use thiserror::Error;

/// Result type alias using MrdsError.
pub type MrdsResult<T> = Result<T, MrdsError>;

/// Primary error type for MRDS operations.
///
/// Every variant means the run cannot proceed. A group that simply
/// produces no chart is not an error: the renderer reports it as a
/// `SkipReason` and the report pipeline as `GroupOutcome::Skipped`.
#[derive(Debug, Error)]
pub enum MrdsError {
    // === Input Errors ===
    #[error("Input table is empty: {0}")]
    EmptyInput(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Failed to read input: {0}")]
    InputReadError(String),

    // === Configuration Errors ===
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    // === Rendering Errors ===
    #[error("Invalid canvas geometry: {0}")]
    InvalidGeometry(String),

    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    // === Output Errors ===
    #[error("Failed to write output: {0}")]
    OutputWriteError(String),

    #[error("Output file name used by more than one group: {0}")]
    DuplicateOutput(String),
}

impl MrdsError {
    /// Short machine-readable code, used in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            MrdsError::EmptyInput(_) => "empty_input",
            MrdsError::MissingColumn(_) => "missing_column",
            MrdsError::InputReadError(_) => "input_read",
            MrdsError::InvalidConfig { .. } => "invalid_config",
            MrdsError::InvalidGeometry(_) => "invalid_geometry",
            MrdsError::EncodeError(_) => "encode",
            MrdsError::OutputWriteError(_) => "output_write",
            MrdsError::DuplicateOutput(_) => "duplicate_output",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for MrdsError {
    fn from(err: std::io::Error) -> Self {
        MrdsError::OutputWriteError(err.to_string())
    }
}

impl From<csv::Error> for MrdsError {
    fn from(err: csv::Error) -> Self {
        MrdsError::InputReadError(format!("CSV error: {}", err))
    }
}

impl From<serde_json::Error> for MrdsError {
    fn from(err: serde_json::Error) -> Self {
        MrdsError::InvalidConfig {
            field: "json".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for MrdsError {
    fn from(err: serde_yaml::Error) -> Self {
        MrdsError::InvalidConfig {
            field: "yaml".to_string(),
            message: err.to_string(),
        }
    }
}
