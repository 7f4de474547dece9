//! Prompt template loading and rendering via `minijinja`.
//!
//! Two prompts exist: `ask` (a free-text question grounded in the user's
//! crop and current sensor reading) and `weather` (advice for a crop given
//! a multi-day forecast). Both ship compiled into the binary; operators can
//! point `advisor.templates_dir` at a directory with replacement
//! `ask.j2` / `weather.j2` files to tune wording without recompiling.

use agribot_types::{ForecastDay, SensorReading};
use minijinja::{Environment, context};

use crate::error::AdvisorError;

const ASK_TEMPLATE: &str = include_str!("../templates/ask.j2");
const WEATHER_TEMPLATE: &str = include_str!("../templates/weather.j2");

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// Create a prompt engine with the built-in templates.
    pub fn new() -> Result<Self, AdvisorError> {
        Self::from_sources(ASK_TEMPLATE.to_owned(), WEATHER_TEMPLATE.to_owned())
    }

    /// Create a prompt engine loading `ask.j2` and `weather.j2` from `dir`.
    pub fn from_dir(dir: &str) -> Result<Self, AdvisorError> {
        let ask = load_template(dir, "ask.j2")?;
        let weather = load_template(dir, "weather.j2")?;
        Self::from_sources(ask, weather)
    }

    fn from_sources(ask: String, weather: String) -> Result<Self, AdvisorError> {
        let mut env = Environment::new();
        env.add_template_owned("ask", ask)
            .map_err(|e| AdvisorError::Template(format!("failed to add ask template: {e}")))?;
        env.add_template_owned("weather", weather)
            .map_err(|e| AdvisorError::Template(format!("failed to add weather template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the question prompt.
    pub fn render_ask(
        &self,
        question: &str,
        crop: &str,
        reading: &SensorReading,
    ) -> Result<String, AdvisorError> {
        self.env
            .get_template("ask")
            .map_err(|e| AdvisorError::Template(format!("missing ask template: {e}")))?
            .render(context! { question, crop, reading })
            .map_err(|e| AdvisorError::Template(format!("ask render failed: {e}")))
    }

    /// Render the forecast-advice prompt.
    pub fn render_weather(
        &self,
        forecast: &[ForecastDay],
        crop: &str,
    ) -> Result<String, AdvisorError> {
        self.env
            .get_template("weather")
            .map_err(|e| AdvisorError::Template(format!("missing weather template: {e}")))?
            .render(context! { forecast, crop })
            .map_err(|e| AdvisorError::Template(format!("weather render failed: {e}")))
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, AdvisorError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| AdvisorError::Template(format!("failed to read {path}: {e}")))
}
