//! Errors that can occur while setting up logging.
//!
//! Malformed level and format strings are not errors; they resolve to
//! defaults. Only installing the process-wide logger can fail.

use thiserror::Error;

/// Errors that can occur during logger setup
#[derive(Error, Debug)]
pub enum LogError {
    /// Another global subscriber is already installed
    #[error("Failed to install global logger: {0}")]
    GlobalInstall(String),

    /// The installed layer could not be swapped
    #[error("Failed to replace global logger: {0}")]
    Reload(String),

    /// A thread panicked while holding the global logger state
    #[error("Global logger state is poisoned")]
    Poisoned,
}

/// Result alias for setup operations
pub type LogResult<T> = Result<T, LogError>;
