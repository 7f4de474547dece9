//! The advisory entry points used by the HTTP layer.
//!
//! Both operations are total: when no backend is configured, or rendering,
//! the HTTP call, or response extraction fails, the canned answer from
//! [`crate::fallback`] is returned and the failure is logged.

use agribot_types::{ForecastDay, SensorReading};

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::fallback::{canned_answer, canned_weather_advice};
use crate::llm::{LlmBackend, create_backend};
use crate::prompt::PromptEngine;

/// Produces advisory text from a generative-AI backend with canned fallbacks.
pub struct Advisor {
    prompts: PromptEngine,
    backend: Option<LlmBackend>,
}

impl Advisor {
    /// Build an advisor from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Template`] if a template directory is
    /// configured but cannot be loaded, or [`AdvisorError::Config`] if the
    /// HTTP client cannot be built.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let prompts = match config.templates_dir.as_deref() {
            Some(dir) => PromptEngine::from_dir(dir)?,
            None => PromptEngine::new()?,
        };
        let backend = create_backend(config)?;
        match &backend {
            Some(b) => tracing::info!(backend = b.name(), model = config.model, "advisor backend ready"),
            None => tracing::info!("no advisor API key configured, serving canned answers"),
        }
        Ok(Self { prompts, backend })
    }

    /// An advisor that only ever serves canned answers.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Template`] if the built-in templates fail to
    /// compile.
    pub fn offline() -> Result<Self, AdvisorError> {
        Ok(Self {
            prompts: PromptEngine::new()?,
            backend: None,
        })
    }

    /// Whether a generative-AI backend is configured.
    pub const fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    /// Answer a farmer's question about `crop` given the current reading.
    pub async fn ask(&self, question: &str, crop: &str, reading: &SensorReading) -> String {
        let Some(backend) = &self.backend else {
            return canned_answer(question, crop);
        };

        let result = match self.prompts.render_ask(question, crop, reading) {
            Ok(prompt) => backend.complete(&prompt).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            log_fallback(backend, "ask", &e);
            canned_answer(question, crop)
        })
    }

    /// Actionable advice for `crop` over the given forecast.
    ///
    /// An empty forecast skips the backend and returns the canned advice.
    pub async fn weather_recommendations(&self, forecast: &[ForecastDay], crop: &str) -> String {
        let Some(backend) = &self.backend else {
            return canned_weather_advice(crop);
        };
        if forecast.is_empty() {
            return canned_weather_advice(crop);
        }

        let result = match self.prompts.render_weather(forecast, crop) {
            Ok(prompt) => backend.complete(&prompt).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            log_fallback(backend, "weather_recommendations", &e);
            canned_weather_advice(crop)
        })
    }
}

fn log_fallback(backend: &LlmBackend, operation: &str, error: &AdvisorError) {
    tracing::warn!(
        backend = backend.name(),
        operation,
        error = %error,
        "advisor call failed, serving canned answer"
    );
}
