//! `OpenWeatherMap` five-day forecast client.
//!
//! The provider returns readings in three-hour steps. The first entry of
//! each UTC calendar date represents that day, and the first five dates
//! are kept. Any failure (missing key, transport error, non-success status,
//! malformed or empty payload) yields [`mock_forecast`] instead, so callers
//! always receive a forecast.

use std::collections::BTreeMap;

use agribot_types::ForecastDay;
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::AdvisorError;
use crate::fallback::mock_forecast;

/// Number of days returned.
pub const FORECAST_DAYS: usize = 5;

/// The subset of the provider payload the summary needs.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

/// HTTP client for the forecast endpoint.
pub struct WeatherClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AdvisorError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            api_key: config.effective_api_key().map(ToOwned::to_owned),
        })
    }

    /// Whether live forecasts can be requested.
    pub const fn is_live(&self) -> bool {
        self.api_key.is_some()
    }

    /// Five-day forecast for `city`, or the mock forecast on any failure.
    pub async fn forecast(&self, city: &str) -> Vec<ForecastDay> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(city, "no weather API key configured, serving mock forecast");
            return mock_forecast();
        };

        match self.fetch(city, api_key).await {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!(city, error = %e, "weather lookup failed, serving mock forecast");
                mock_forecast()
            }
        }
    }

    async fn fetch(&self, city: &str, api_key: &str) -> Result<Vec<ForecastDay>, AdvisorError> {
        let url = format!("{}/forecast", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AdvisorError::Weather(format!("request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!("weather provider rejected the configured API key");
        }
        if !status.is_success() {
            return Err(AdvisorError::Weather(format!("provider returned {status}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Weather(format!("response parse failed: {e}")))?;

        let days = summarize_forecast(&json)?;
        if days.is_empty() {
            return Err(AdvisorError::Weather("forecast contained no entries".to_owned()));
        }
        Ok(days)
    }
}

/// Reduce a provider payload to at most [`FORECAST_DAYS`] daily summaries.
///
/// # Errors
///
/// Returns [`AdvisorError::Serde`] if the payload does not have the expected
/// shape, or [`AdvisorError::Weather`] if an entry has no condition block
/// or an out-of-range timestamp.
pub fn summarize_forecast(json: &serde_json::Value) -> Result<Vec<ForecastDay>, AdvisorError> {
    let response = ForecastResponse::deserialize(json)?;

    let mut first_per_date: BTreeMap<NaiveDate, ForecastEntry> = BTreeMap::new();
    for entry in response.list {
        let date = DateTime::from_timestamp(entry.dt, 0)
            .ok_or_else(|| AdvisorError::Weather(format!("invalid timestamp {}", entry.dt)))?
            .date_naive();
        first_per_date.entry(date).or_insert(entry);
    }

    first_per_date
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|(date, entry)| {
            let condition = entry.weather.into_iter().next().ok_or_else(|| {
                AdvisorError::Weather(format!("entry for {date} has no conditions"))
            })?;
            Ok(ForecastDay {
                day: date.format("%A").to_string(),
                date: date.format("%Y-%m-%d").to_string(),
                temp: (entry.main.temp * 10.0).round() / 10.0,
                humidity: entry.main.humidity,
                description: title_case(&condition.description),
                icon: condition.icon,
            })
        })
        .collect()
}

/// Capitalize the first letter of every word and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
