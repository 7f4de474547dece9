//! Configuration types for the advisor and weather client.
//!
//! Both sections deserialize from the `advisor` and `weather` blocks of the
//! service config file. Every field has a default, and API keys can be
//! supplied through the environment instead of the file:
//!
//! - `GEMINI_API_KEY` -- generative-AI key (`advisor.api_key`)
//! - `WEATHER_API_KEY` -- `OpenWeatherMap` key (`weather.api_key`)
//!
//! A missing key is not an error: the advisor then answers from its canned
//! fallback tables and the weather client serves the mock forecast.

use std::time::Duration;

use serde::Deserialize;

/// Supported generative-AI backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// `OpenAI`-compatible chat completions API.
    #[serde(alias = "openai-compatible", alias = "ollama", alias = "deepseek")]
    OpenAi,
}

/// Generative-AI advisor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvisorConfig {
    /// Which API dialect to speak.
    #[serde(default = "default_backend")]
    pub backend: BackendType,

    /// Base API URL (e.g. `https://generativelanguage.googleapis.com/v1beta/models`).
    #[serde(default = "default_advisor_api_url")]
    pub api_url: String,

    /// API key. `None` disables outbound calls.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_advisor_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory holding `ask.j2` and `weather.j2` to replace the built-in
    /// prompt templates.
    #[serde(default)]
    pub templates_dir: Option<String>,
}

impl AdvisorConfig {
    /// Take the API key from `GEMINI_API_KEY` when it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(&env_lookup);
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(key) = non_empty(lookup, "GEMINI_API_KEY") {
            self.api_key = Some(key);
        }
    }

    /// The configured key, ignoring blank values.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Per-call timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            api_url: default_advisor_api_url(),
            api_key: None,
            model: default_model(),
            timeout_secs: default_advisor_timeout_secs(),
            templates_dir: None,
        }
    }
}

/// Weather provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherConfig {
    /// `OpenWeatherMap` API base URL.
    #[serde(default = "default_weather_api_url")]
    pub api_url: String,

    /// API key. `None` serves the mock forecast.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-call timeout in seconds.
    #[serde(default = "default_weather_timeout_secs")]
    pub timeout_secs: u64,

    /// City used when a request does not name one.
    #[serde(default = "default_city")]
    pub default_city: String,
}

impl WeatherConfig {
    /// Take the API key from `WEATHER_API_KEY` when it is set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(&env_lookup);
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        if let Some(key) = non_empty(lookup, "WEATHER_API_KEY") {
            self.api_key = Some(key);
        }
    }

    /// The configured key, ignoring blank values.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Per-call timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_weather_api_url(),
            api_key: None,
            timeout_secs: default_weather_timeout_secs(),
            default_city: default_city(),
        }
    }
}

/// Reads a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(lookup: &dyn Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|v| !v.trim().is_empty())
}

const fn default_backend() -> BackendType {
    BackendType::Gemini
}

fn default_advisor_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_owned()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_owned()
}

const fn default_advisor_timeout_secs() -> u64 {
    30
}

fn default_weather_api_url() -> String {
    "http://api.openweathermap.org/data/2.5".to_owned()
}

const fn default_weather_timeout_secs() -> u64 {
    10
}

fn default_city() -> String {
    "Delhi".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_gemini_without_key() {
        let config = AdvisorConfig::default();
        assert_eq!(config.backend, BackendType::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash-latest");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.effective_api_key().is_none());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = AdvisorConfig {
            api_key: Some("   ".to_owned()),
            ..AdvisorConfig::default()
        };
        assert!(config.effective_api_key().is_none());

        let weather = WeatherConfig {
            api_key: Some(String::new()),
            ..WeatherConfig::default()
        };
        assert!(weather.effective_api_key().is_none());
    }

    #[test]
    fn backend_aliases_deserialize() {
        let parsed: Result<BackendType, _> = serde_json::from_str("\"ollama\"");
        assert_eq!(parsed.ok(), Some(BackendType::OpenAi));
        let parsed: Result<BackendType, _> = serde_json::from_str("\"gemini\"");
        assert_eq!(parsed.ok(), Some(BackendType::Gemini));
    }

    #[test]
    fn keys_come_from_lookup_when_non_empty() {
        let vars = |name: &str| match name {
            "GEMINI_API_KEY" => Some("g-key".to_owned()),
            "WEATHER_API_KEY" => Some("  ".to_owned()),
            _ => None,
        };
        let mut advisor = AdvisorConfig::default();
        advisor.apply_overrides(&vars);
        assert_eq!(advisor.effective_api_key(), Some("g-key"));

        let mut weather = WeatherConfig {
            api_key: Some("from-file".to_owned()),
            ..WeatherConfig::default()
        };
        weather.apply_overrides(&vars);
        assert_eq!(weather.effective_api_key(), Some("from-file"));
    }

    #[test]
    fn weather_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.default_city, "Delhi");
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
