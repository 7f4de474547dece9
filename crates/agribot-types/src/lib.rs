//! Shared type definitions for the AgriBot advisory backend.
//!
//! This crate is the single source of truth for the records that flow
//! between the simulator, the advisor, the data layer, and the HTTP API.
//! Types are exported to `TypeScript` via `ts-rs` for the dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for users and status checks
//! - [`enums`] -- Crop labels and farm-profile categories
//! - [`structs`] -- Readings, farm profiles, market quotes, forecasts, users

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Crop, IrrigationType, Season, SoilType};
pub use ids::{StatusCheckId, UserId};
pub use structs::{FarmProfile, ForecastDay, MarketQuote, SensorReading, StatusCheck, User};
