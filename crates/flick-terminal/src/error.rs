//! Error types for flick-terminal.

use flick_widgets::ConfigError;
use thiserror::Error;

/// Errors that can occur in the demo application.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error from terminal operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Switch options could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Headless frame could not be encoded.
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal not available.
    #[error("Terminal not available")]
    TerminalNotAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
        assert!(tui_err.to_string().contains("IO error"));
    }

    #[test]
    fn test_tui_error_config() {
        let config_err = ConfigError::InvalidVelocityThreshold(-1.0);
        let tui_err: TuiError = config_err.into();
        assert!(matches!(tui_err, TuiError::Config(_)));
        assert!(tui_err.to_string().starts_with("config error"));
    }

    #[test]
    fn test_tui_error_terminal_not_available() {
        assert_eq!(
            TuiError::TerminalNotAvailable.to_string(),
            "Terminal not available"
        );
    }
}
