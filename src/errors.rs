//! Centralized error handling.
//!
//! Provides a unified error type for every command, pipeline stage and
//! template function, with a stable code used when reporting failures.

use std::path::PathBuf;

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Configuration (fatal at registration or build time)
    #[error("Invalid command configuration: {0}")]
    Configuration(String),

    #[error("Variable '{0}' is not defined in this pipeline")]
    MissingVariable(String),

    // User input
    #[error("Directory '{}' does not exist.", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Pipeline
    #[error("Command '{command}' faulted at stage '{stage}': {reason}")]
    PipelineFaulted {
        command: String,
        stage: String,
        reason: String,
    },

    // External
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Directory scan error: {0}")]
    Scan(#[from] walkdir::Error),

    #[error(transparent)]
    Cli(#[from] clap::Error),
}

impl AppError {
    /// Get error code for log output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::MissingVariable(_) => "MISSING_VARIABLE",
            AppError::DirectoryNotFound(_) => "DIRECTORY_NOT_FOUND",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::PipelineFaulted { .. } => "PIPELINE_FAULTED",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "SERIALIZATION_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Scan(_) => "SCAN_ERROR",
            AppError::Cli(_) => "USAGE_ERROR",
        }
    }

    /// Whether the error comes from a bad declaration rather than user input
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_) | AppError::MissingVariable(_)
        )
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = AppError::DirectoryNotFound(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "Directory '/no/such/dir' does not exist.");
        assert_eq!(err.code(), "DIRECTORY_NOT_FOUND");
    }

    #[test]
    fn test_configuration_errors_are_flagged() {
        assert!(AppError::configuration("bad alias").is_configuration());
        assert!(AppError::MissingVariable("Option".into()).is_configuration());
        assert!(!AppError::not_found("entity").is_configuration());
    }
}
