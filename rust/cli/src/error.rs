//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
//! the variants to process exit codes.

use std::fmt;

use luckydraw_engine::errors::{DrawError, RigRuleError};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (state file, name list, stdout/stderr writes)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The engine refused an operation
    Engine(String),

    /// A foreground run ended before it finished
    Interrupted(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "{}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Engine(error)
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<DrawError> for CliError {
    fn from(error: DrawError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<RigRuleError> for CliError {
    fn from(error: RigRuleError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}
