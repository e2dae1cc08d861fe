//! Error types and handling for the `TripForge` application

use thiserror::Error;

/// Main error type for the `TripForge` application
#[derive(Error, Debug)]
pub enum TripForgeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Model API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripForgeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message for the form banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripForgeError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            TripForgeError::Api { message } => {
                format!("Error: {message}")
            }
            TripForgeError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripForgeError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripForgeError::config("missing API key");
        assert!(matches!(config_err, TripForgeError::Config { .. }));

        let api_err = TripForgeError::api("connection failed");
        assert!(matches!(api_err, TripForgeError::Api { .. }));

        let validation_err = TripForgeError::validation("empty destination");
        assert!(matches!(validation_err, TripForgeError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripForgeError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = TripForgeError::api("no response");
        assert!(api_err.user_message().contains("no response"));

        let validation_err = TripForgeError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }
}
