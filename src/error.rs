use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ProjectType;

/// Application-wide error type for the hubscan CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required option --{0}")]
    MissingRequiredOption(&'static str),

    #[error("Unsupported project type '{0}' (expected one of: {})", ProjectType::supported_names())]
    UnsupportedProjectType(String),

    #[error("Source path '{}' does not exist", .0.display())]
    InvalidSourcePath(PathBuf),

    #[error("Missing value for option {0}")]
    MissingFlagValue(String),

    #[error("Unsupported option '{0}'")]
    UnsupportedFlag(String),

    #[error("Unsupported project version phase '{0}'")]
    UnsupportedVersionPhase(String),

    #[error("Missing {0}; set it in the environment or the configuration file")]
    MissingCredential(&'static str),

    #[error("{0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Scanner exited with status {0}")]
    ScannerFailed(i32),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}
