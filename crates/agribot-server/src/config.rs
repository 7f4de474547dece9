//! Service configuration loaded from `agribot-config.yaml`.
//!
//! Every field has a default, so a missing or empty file yields a working
//! development setup: in-memory store, canned advisory answers, mock
//! weather. The file path can be changed with `AGRIBOT_CONFIG`, and these
//! environment variables override the file:
//!
//! - `DATABASE_URL` overrides `database.url`
//! - `GEMINI_API_KEY` overrides `advisor.api_key`
//! - `WEATHER_API_KEY` overrides `weather.api_key`
//! - `CORS_ORIGINS` (comma-separated) overrides `server.cors_origins`
//! - `AGRIBOT_PORT` overrides `server.port`
//! - `AGRIBOT_SEED` overrides `simulation.seed`

use std::path::{Path, PathBuf};
use std::time::Duration;

use agribot_advisor::{AdvisorConfig, WeatherConfig, env_lookup};
use serde::Deserialize;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "agribot-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {name}: {reason}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Listener and CORS settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Persistence backend.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session lifetime and password hashing.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Generative-AI advisor.
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Weather provider.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Sensor and market simulation.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from `AGRIBOT_CONFIG` (or [`DEFAULT_CONFIG_PATH`]) and apply
    /// environment overrides. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env_lookup("AGRIBOT_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        config.apply_overrides(&env_lookup)?;
        Ok(config)
    }

    /// Read and parse a YAML file without applying overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from a variable source (the process environment in
    /// production).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `AGRIBOT_PORT` or `AGRIBOT_SEED` is
    /// not a valid number.
    pub fn apply_overrides(
        &mut self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.server.cors_origins = split_origins(&origins);
        }
        if let Some(port) = lookup("AGRIBOT_PORT") {
            self.server.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    name: "AGRIBOT_PORT",
                    value: port.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(seed) = lookup("AGRIBOT_SEED") {
            let parsed = seed.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    name: "AGRIBOT_SEED",
                    value: seed.clone(),
                    reason: e.to_string(),
                }
            })?;
            self.simulation.seed = Some(parsed);
        }
        self.advisor.apply_overrides(lookup);
        self.weather.apply_overrides(lookup);
        Ok(())
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. `*` allows any origin (without credentials).
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` URL. `None` selects the in-memory store.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Session and password-hashing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of an access token.
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,

    /// `bcrypt` work factor (4..=31).
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Session lifetime as a [`Duration`].
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_minutes.saturating_mul(60))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: default_session_ttl_minutes(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the shared random generator. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8001
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_owned()]
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_session_ttl_minutes() -> u64 {
    30
}

const fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let parsed = AppConfig::parse("   \n");
        assert!(matches!(&parsed, Ok(c) if *c == AppConfig::default()));
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.auth.session_ttl(), Duration::from_secs(1800));
        assert_eq!(config.auth.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = r"
server:
  port: 9000
  cors_origins: [http://localhost:3000]
advisor:
  backend: openai
  model: llama3
simulation:
  seed: 7
logging:
  json: true
";
        let parsed = AppConfig::parse(yaml);
        assert!(parsed.is_ok());
        let config = parsed.unwrap_or_default();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, ["http://localhost:3000"]);
        assert_eq!(config.advisor.model, "llama3");
        assert_eq!(config.simulation.seed, Some(7));
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.weather.default_city, "Delhi");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = AppConfig::parse("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn overrides_apply() {
        let mut config = AppConfig::default();
        let lookup = vars(&[
            ("DATABASE_URL", "postgresql://db/agribot"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,,"),
            ("AGRIBOT_PORT", "8080"),
            ("AGRIBOT_SEED", "42"),
            ("GEMINI_API_KEY", "g"),
            ("WEATHER_API_KEY", "w"),
        ]);
        assert!(config.apply_overrides(&lookup).is_ok());
        assert_eq!(config.database.url.as_deref(), Some("postgresql://db/agribot"));
        assert_eq!(config.server.cors_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.advisor.effective_api_key(), Some("g"));
        assert_eq!(config.weather.effective_api_key(), Some("w"));
    }

    #[test]
    fn malformed_port_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(&vars(&[("AGRIBOT_PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::Env { name: "AGRIBOT_PORT", .. })));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let parsed = AppConfig::parse(include_str!("../../../agribot-config.yaml"));
        assert!(matches!(&parsed, Ok(c) if *c == AppConfig::default()));
    }
}
