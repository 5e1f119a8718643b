//! Error types for camkeep operations.

use thiserror::Error;

/// Primary error type for camkeep operations.
#[derive(Error, Debug)]
pub enum CamkeepError {
    // Device errors
    #[error("No video devices found")]
    NoDevicesFound,

    // Input file errors
    #[error("Settings file not found: {path}")]
    SettingsFileNotFound { path: String },

    #[error("No relevant settings found in GUVCView config/profile: {path}")]
    NoSettingsFound { path: String },

    // Restore script errors
    #[error("Failed to write restore script '{path}': {source}")]
    ScriptWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Restore script not found: {path}")]
    ScriptNotFound { path: String },

    // External command errors
    #[error("Failed to run '{command}': {reason}")]
    CommandSpawn { command: String, reason: String },

    #[error("Command '{command}' exited with status {status}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // Interactive input errors
    #[error("Input closed before a choice was made")]
    InputClosed,

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

fn format_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl CamkeepError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoDevicesFound
                | Self::SettingsFileNotFound { .. }
                | Self::NoSettingsFound { .. }
                | Self::ScriptNotFound { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
                | Self::ConfigInvalid(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoDevicesFound => Some("Ensure the webcam is connected and /dev/video* exists"),
            Self::NoSettingsFound { .. } => Some(
                "If you selected a GUVCView profile (.gpfl), make sure it contains control data",
            ),
            Self::ScriptNotFound { .. } => Some("Run: camkeep setup"),
            Self::CommandSpawn { .. } => Some("Install v4l-utils (v4l2-ctl) and udev"),
            Self::ConfigParse(_) => Some("Check the TOML syntax of the configuration file"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using CamkeepError.
pub type Result<T> = std::result::Result<T, CamkeepError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CamkeepError::Other(format!("{}: {e}", f().into())))
    }
}
