//! Configuration management for the `TripForge` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripForgeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripForge` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripForgeConfig {
    /// Generative model API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default form values
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Generative model API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key, required at startup
    pub api_key: Option<String>,
    /// Base URL for the Generative Language API
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    /// Model resource name
    #[serde(default = "default_gemini_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_gemini_timeout")]
    pub timeout_seconds: u32,
    /// Sampling temperature for plan generation
    #[serde(default = "default_gemini_temperature")]
    pub temperature: f32,
}

/// Web server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_bind")]
    pub bind: String,
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default form values served to the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default number of travellers
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    /// Default trip length in days
    #[serde(default = "default_num_days")]
    pub num_days: u32,
}

// Default value functions
fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "models/gemini-1.5-pro".to_string()
}

fn default_gemini_timeout() -> u32 {
    60
}

fn default_gemini_temperature() -> f32 {
    0.7
}

fn default_server_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_party_size() -> u32 {
    2
}

fn default_num_days() -> u32 {
    3
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            timeout_seconds: default_gemini_timeout(),
            temperature: default_gemini_temperature(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_server_bind(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            party_size: default_party_size(),
            num_days: default_num_days(),
        }
    }
}

impl Default for TripForgeConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl TripForgeConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPFORGE_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPFORGE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripForgeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Fall back to the GOOGLE_API_KEY env var for the credential,
        // mirroring the managed-secrets-then-env resolution order
        if config.gemini.api_key.is_none() {
            if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
                if !key.is_empty() {
                    config.gemini.api_key = Some(key);
                }
            }
        }

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripforge").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.gemini.base_url.is_empty() {
            self.gemini.base_url = default_gemini_base_url();
        }
        if self.gemini.model.is_empty() {
            self.gemini.model = default_gemini_model();
        }
        if self.gemini.timeout_seconds == 0 {
            self.gemini.timeout_seconds = default_gemini_timeout();
        }
        if self.server.bind.is_empty() {
            self.server.bind = default_server_bind();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.party_size == 0 {
            self.defaults.party_size = default_party_size();
        }
        if self.defaults.num_days == 0 {
            self.defaults.num_days = default_num_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the model API credential. Absence is a fatal startup condition.
    pub fn validate_api_key(&self) -> Result<()> {
        match &self.gemini.api_key {
            None => Err(TripForgeError::config(
                "GOOGLE_API_KEY not found. Set it in the environment or under [gemini] in config.toml.",
            )
            .into()),
            Some(api_key) if api_key.is_empty() => Err(TripForgeError::config(
                "Gemini API key cannot be empty. Please provide a valid key.",
            )
            .into()),
            Some(api_key) if api_key.len() < 8 => Err(TripForgeError::config(
                "Gemini API key appears to be invalid (too short). Please check your API key.",
            )
            .into()),
            Some(api_key) if api_key.len() > 100 => Err(TripForgeError::config(
                "Gemini API key appears to be invalid (too long). Please check your API key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.gemini.timeout_seconds > 300 {
            return Err(
                TripForgeError::config("Model API timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err(TripForgeError::config(
                "Sampling temperature must be between 0.0 and 2.0",
            )
            .into());
        }

        if self.defaults.party_size > 100 {
            return Err(TripForgeError::config("Default party size cannot exceed 100").into());
        }

        if self.defaults.num_days > 60 {
            return Err(TripForgeError::config("Default trip length cannot exceed 60 days").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripForgeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripForgeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.gemini.base_url.starts_with("http://")
            && !self.gemini.base_url.starts_with("https://")
        {
            return Err(TripForgeError::config(
                "Model API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// First characters of the credential for the diagnostics panel
    #[must_use]
    pub fn api_key_preview(&self) -> String {
        match &self.gemini.api_key {
            Some(key) => format!("{}...", key.chars().take(5).collect::<String>()),
            None => "not set".to_string(),
        }
    }
}
