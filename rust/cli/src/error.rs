//! Error types for the CLI application.

use std::fmt;

use bjtrainer_engine::errors::GameError;

/// Exit code for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for any failure.
pub const EXIT_ERROR: i32 = 2;
/// Exit code when a run was cut short (Ctrl+C convention).
pub const EXIT_INTERRUPTED: i32 = 130;

/// Custom error type for CLI operations.
///
/// Every command handler returns `Result<(), CliError>`; [`crate::run`] maps
/// the variant to a process exit code with [`CliError::exit_code`].
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Operation was interrupted before finishing
    Interrupted(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Interrupted(_) => EXIT_INTERRUPTED,
            _ => EXIT_ERROR,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
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

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::InvalidCard(_)
            | GameError::InvalidBetAmount { .. }
            | GameError::InvalidMinBet(_)
            | GameError::InvalidMinCards { .. } => CliError::InvalidInput(error.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}
