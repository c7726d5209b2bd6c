//! TOML-based configuration for Polish
//!
//! Configuration is read once at startup from `polish.toml` (or the path given
//! with `--config`). Secrets never live in the file: the provider section
//! names the environment variable that holds the credential, which is resolved
//! into [`ProviderSettings`] when the server starts. After that point the
//! configuration is immutable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure loaded from polish.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolishConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============= Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Environment variable that, when set, overrides `model`
    #[serde(default = "default_model_env")]
    pub model_env: String,

    #[serde(default = "default_openai_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model_env() -> String {
    "OPENAI_MODEL".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            model_env: default_model_env(),
            api_base: default_openai_base(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Provider configuration with environment references resolved
#[derive(Clone)]
pub struct ProviderSettings {
    /// `None` when the credential variable is unset or blank
    pub api_key: Option<String>,
    /// Name of the variable the credential was read from
    pub api_key_env: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ProviderSettings {
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl PolishConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. Returns whether the file was found.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<(Self, bool), ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok((config, true)),
            Err(ConfigError::FileNotFound(_)) => Ok((Self::default(), false)),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PolishConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if !matches!(self.server.log_format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "server.log_format must be 'pretty' or 'json', got '{}'",
                self.server.log_format
            )));
        }

        let provider = &self.provider;
        let required = [
            ("provider.api_key_env", &provider.api_key_env),
            ("provider.model_env", &provider.model_env),
            ("provider.api_base", &provider.api_base),
            ("provider.model", &provider.model),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                provider.temperature
            )));
        }
        if provider.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "provider.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Read an environment variable, treating blank values as unset
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get the provider API key from the environment
    pub fn api_key(&self) -> Option<String> {
        self.resolve_env(&self.provider.api_key_env)
    }

    /// Model from the override variable, or the configured one
    pub fn effective_model(&self) -> String {
        self.resolve_env(&self.provider.model_env)
            .unwrap_or_else(|| self.provider.model.clone())
    }

    /// Resolve environment references into the settings the gateway uses
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            api_key: self.api_key(),
            api_key_env: self.provider.api_key_env.clone(),
            api_base: self.provider.api_base.trim_end_matches('/').to_string(),
            model: self.effective_model(),
            temperature: self.provider.temperature,
            timeout: Duration::from_secs(self.provider.timeout_secs),
        }
    }
}
