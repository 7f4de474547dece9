//! Error types for the advisor.
//!
//! These errors never reach API clients: every public advisory entry point
//! catches them and substitutes canned text. They exist so the fallback
//! path can log what went wrong.

/// Errors that can occur while producing advisory text or forecasts.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Failed to load or render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// A generative-AI backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// The weather provider returned an error or an unexpected payload.
    #[error("weather provider error: {0}")]
    Weather(String),

    /// Configuration is invalid or an HTTP client could not be built.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
