//! TOML-based service configuration with environment overrides.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Environment variable overriding [`LlmConfig::api_base`].
pub const ENV_LM_API_BASE: &str = "LM_STUDIO_API_BASE";
/// Environment variable overriding [`ServerConfig::port`].
pub const ENV_PORT: &str = "PORT";

/// Top-level service configuration parsed from TOML.
///
/// All fields have defaults, so an empty file (or no file) is valid. Load
/// with [`ServiceConfig::from_toml_file`], then apply environment overrides
/// with [`ServiceConfig::apply_env`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion API settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Template summary settings.
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Completion API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    /// Whether to try the completion API at all.
    pub enabled: bool,
    /// OpenAI-compatible base URL, e.g. `http://localhost:1234/v1`.
    pub api_base: String,
    /// Model name sent with each request.
    pub model: String,
    /// Generation request timeout (seconds).
    pub timeout_secs: u64,
    /// Liveness probe timeout (seconds).
    pub probe_timeout_secs: u64,
    /// Sampling temperature (0.0 to 2.0).
    pub temperature: f32,
    /// Completion length cap.
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "http://localhost:1234/v1".to_string(),
            model: "local-model".to_string(),
            timeout_secs: 30,
            probe_timeout_secs: 5,
            temperature: 0.7,
            max_tokens: 256,
        }
    }
}

/// Template summary settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// Fixes phrase selection when set; otherwise phrases are drawn from OS
    /// entropy per summary.
    pub seed: Option<u64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ServiceConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Applies [`ENV_LM_API_BASE`] and [`ENV_PORT`] from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `PORT` is not a valid port number.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the port override is not a valid port number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(base) = lookup(ENV_LM_API_BASE) {
            self.llm.api_base = base;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError {
                field: ENV_PORT.to_string(),
                message: format!("\"{port}\" is not a valid port number"),
            })?;
        }
        Ok(())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }

        let llm = &self.llm;
        if llm.api_base.trim().is_empty() {
            errors.push(ConfigError {
                field: "llm.api_base".into(),
                message: "must not be empty".into(),
            });
        }
        if llm.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "llm.timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }
        if llm.probe_timeout_secs == 0 {
            errors.push(ConfigError {
                field: "llm.probe_timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=2.0).contains(&llm.temperature) {
            errors.push(ConfigError {
                field: "llm.temperature".into(),
                message: "must be in [0.0, 2.0]".into(),
            });
        }
        if llm.max_tokens == 0 {
            errors.push(ConfigError {
                field: "llm.max_tokens".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}
