//! Shared application state for the HTTP API.
//!
//! [`AppState`] owns every long-lived service the handlers need. It is
//! wrapped in an [`Arc`](std::sync::Arc) and handed to the router.
//!
//! Randomness is only reached through [`AppState::with_rng`], which cannot
//! span an `.await`. With `simulation.seed` set, every request draws from one
//! shared seeded generator so runs are reproducible. Without a seed each call
//! gets its own generator seeded from the thread-local RNG, so requests never
//! contend.

use std::sync::{Mutex, PoisonError};

use agribot_advisor::{Advisor, WeatherClient};
use agribot_db::{PostgresPool, Store};
use agribot_sim::MemoryReadingStore;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Services shared by every request.
pub struct AppState {
    /// Users and status checks.
    pub store: Store,
    /// Bearer-token sessions.
    pub sessions: SessionStore,
    /// Last simulated reading per user.
    pub readings: MemoryReadingStore,
    /// Generative-AI advisor with canned fallbacks.
    pub advisor: Advisor,
    /// Forecast client with mock fallback.
    pub weather: WeatherClient,
    /// City used when a weather request names none.
    pub default_city: String,
    /// `bcrypt` work factor for new passwords.
    pub bcrypt_cost: u32,
    seeded_rng: Option<Mutex<StdRng>>,
}

impl AppState {
    /// Assemble state from already-built services.
    pub fn new(
        store: Store,
        advisor: Advisor,
        weather: WeatherClient,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            sessions: SessionStore::new(config.auth.session_ttl()),
            readings: MemoryReadingStore::new(),
            advisor,
            weather,
            default_city: config.weather.default_city.clone(),
            bcrypt_cost: config.auth.bcrypt_cost,
            seeded_rng: config
                .simulation
                .seed
                .map(|seed| Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Build every service from configuration: connect and migrate the
    /// database when a URL is configured, otherwise use the in-memory store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Database`] if the database is unreachable or a
    /// migration fails, or [`ApiError::Internal`] if the advisor or weather
    /// client cannot be built.
    pub async fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let store = match config.database.url.as_deref() {
            Some(url) => Store::Postgres(
                PostgresPool::open(url, config.database.max_connections).await?,
            ),
            None => Store::memory(),
        };
        let advisor = Advisor::from_config(&config.advisor)
            .map_err(|e| ApiError::Internal(format!("advisor setup failed: {e}")))?;
        let weather = WeatherClient::new(&config.weather)
            .map_err(|e| ApiError::Internal(format!("weather client setup failed: {e}")))?;

        tracing::info!(
            store = store.backend_name(),
            advisor_live = advisor.is_live(),
            weather_live = weather.is_live(),
            seeded = config.simulation.seed.is_some(),
            "application state ready"
        );

        Ok(Self::new(store, advisor, weather, config))
    }

    /// Run `f` with a random generator: the shared seeded one when a seed is
    /// configured, otherwise a fresh per-call generator.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        match &self.seeded_rng {
            Some(shared) => {
                let mut rng = shared.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut rng)
            }
            None => f(&mut StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Whether draws come from the shared seeded generator.
    pub const fn is_seeded(&self) -> bool {
        self.seeded_rng.is_some()
    }
}
