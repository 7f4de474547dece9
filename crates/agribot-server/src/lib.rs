//! HTTP API for the AgriBot agricultural advisory backend.
//!
//! An Axum server exposing account management, client status checks, and
//! the advisory endpoints (simulated sensor readings, crop and market
//! recommendations, yield estimates, weather, and generative-AI chat).
//!
//! # Architecture
//!
//! ```text
//! Request --> CORS --> Trace --> Router (/api)
//!                                  |-- handlers  (root, status checks)
//!                                  |-- auth      (signup, login, me)
//!                                  +-- agribot   (advisory endpoints)
//!                                        |
//!                   CurrentUser extractor (bearer token -> session -> user)
//!                                        |
//!        AppState: Store, SessionStore, MemoryReadingStore, Advisor,
//!                  WeatherClient, seeded StdRng
//! ```

pub mod agribot;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

// Re-export primary types for convenience.
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
