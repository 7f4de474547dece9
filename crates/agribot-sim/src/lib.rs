//! Sensor simulation and rule-based advisory models for AgriBot.
//!
//! Everything in this crate is a total function over its inputs: there is
//! no error type. Randomness is always injected as `&mut impl Rng` so tests
//! can pin behavior with a seeded generator, and the per-user reading cache
//! is an explicit [`ReadingStore`] owned by the caller.
//!
//! # Modules
//!
//! - [`sensor`] -- Seven-field sensor readings: uniform first sample,
//!   bounded random walk afterwards.
//! - [`store`] -- Keyed last-reading store and the read-drift-write cycle.
//! - [`crop`] -- Ordered threshold rules mapping a reading to a crop.
//! - [`farm`] -- Synthetic farm profiles and the multiplier-table yield
//!   estimate.
//! - [`market`] -- Jittered per-market price quotes for a crop.

pub mod crop;
pub mod farm;
pub mod market;
pub mod sensor;
pub mod store;

// Re-export primary entry points at crate root.
pub use crop::{CropRule, matching_rule, recommend_crop};
pub use farm::{base_yield, estimate_yield, simulate_farm};
pub use market::{QUOTE_COUNT, base_price, market_quotes};
pub use sensor::{SensorField, simulate_reading};
pub use store::{MemoryReadingStore, ReadingStore, advance_reading};

/// Round to two decimal places, the precision every simulated value carries.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
