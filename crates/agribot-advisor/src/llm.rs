//! Generative-AI backend abstraction and implementations.
//!
//! Enum dispatch instead of a trait object, since async methods are not
//! dyn-compatible. Two dialects are spoken over `reqwest`:
//!
//! - Gemini `generateContent`, keyed through the `key` query parameter
//! - `OpenAI`-compatible chat completions, keyed through a bearer header
//!
//! Both take a single rendered prompt and return plain text.

use crate::config::{AdvisorConfig, BackendType};
use crate::error::AdvisorError;

/// A generative-AI backend that turns a prompt into advisory text.
pub enum LlmBackend {
    /// Google Gemini `generateContent` API.
    Gemini(GeminiBackend),
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
}

impl LlmBackend {
    /// Send a prompt and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::LlmBackend`] if the HTTP call fails, the
    /// provider answers with a non-success status, or the response carries
    /// no text.
    pub async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        match self {
            Self::Gemini(backend) => backend.complete(prompt).await,
            Self::OpenAi(backend) => backend.complete(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Gemini(_) => "gemini",
            Self::OpenAi(_) => "openai-compatible",
        }
    }
}

/// Backend for the Gemini `generateContent` API.
///
/// Sends requests to `{api_url}/{model}:generateContent?key={api_key}` and
/// reads `candidates[0].content.parts[0].text`.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let url = format!("{}/{}:generateContent", self.api_url, self.model);

        let body = serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::LlmBackend(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AdvisorError::LlmBackend(format!(
                "Gemini returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::LlmBackend(format!("Gemini response parse failed: {e}")))?;

        extract_gemini_text(&json)
    }
}

/// Extract the generated text from a Gemini response.
fn extract_gemini_text(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::LlmBackend(
                "Gemini response missing candidates[0].content.parts[0].text".to_owned(),
            )
        })
}

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.api_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.7,
            "max_tokens": 512
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::LlmBackend(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(AdvisorError::LlmBackend(format!(
                "OpenAI returned {status}: {error_body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::LlmBackend(format!("OpenAI response parse failed: {e}")))?;

        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, AdvisorError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            AdvisorError::LlmBackend(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

/// Create a backend from configuration.
///
/// Returns `Ok(None)` when no API key is configured; callers then answer
/// from the canned fallbacks without touching the network.
///
/// # Errors
///
/// Returns [`AdvisorError::Config`] if the HTTP client cannot be built.
pub fn create_backend(config: &AdvisorConfig) -> Result<Option<LlmBackend>, AdvisorError> {
    let Some(api_key) = config.effective_api_key() else {
        return Ok(None);
    };

    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| AdvisorError::Config(format!("failed to build HTTP client: {e}")))?;

    let api_url = config.api_url.trim_end_matches('/').to_owned();
    let api_key = api_key.to_owned();
    let model = config.model.clone();

    let backend = match config.backend {
        BackendType::Gemini => LlmBackend::Gemini(GeminiBackend {
            client,
            api_url,
            api_key,
            model,
        }),
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend {
            client,
            api_url,
            api_key,
            model,
        }),
    };
    Ok(Some(backend))
}
