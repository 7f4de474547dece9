//! Generative-AI advisory text and weather forecasts for AgriBot.
//!
//! Outbound calls are optional. Without API keys, or when a provider
//! fails, every entry point returns canned text or the mock forecast, so
//! the HTTP layer never surfaces an upstream error.
//!
//! # Modules
//!
//! - [`advisor`] -- Question answering and forecast advice with fallbacks
//! - [`config`] -- `advisor` and `weather` configuration sections
//! - [`error`] -- Internal error type, logged and never returned to clients
//! - [`fallback`] -- Keyword answers, generic forecast advice, mock forecast
//! - [`llm`] -- Gemini and `OpenAI`-compatible backends
//! - [`prompt`] -- `minijinja` prompt templates
//! - [`weather`] -- `OpenWeatherMap` forecast client and summarizer

pub mod advisor;
pub mod config;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod prompt;
pub mod weather;

pub use advisor::Advisor;
pub use config::{AdvisorConfig, BackendType, WeatherConfig, env_lookup};
pub use error::AdvisorError;
pub use fallback::{canned_answer, canned_weather_advice, mock_forecast};
pub use weather::WeatherClient;
