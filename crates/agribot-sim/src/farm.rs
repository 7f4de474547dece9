//! Synthetic farm profiles and the yield estimate.
//!
//! The estimate starts from 2.5 tons per acre and scales it by three lookup
//! tables plus a fertilizer term:
//!
//! ```text
//! yield = area * 2.5 * irrigation * soil * season * (1 + fertilizer / 20) * jitter
//! ```
//!
//! `jitter` is uniform in `[0.85, 1.15]`. Categories outside the tables
//! (`Unknown`) contribute a neutral factor of 1.0.

use agribot_types::{FarmProfile, IrrigationType, Season, SoilType};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::round2;

/// Tons harvested per acre before any adjustment.
pub const BASE_TONS_PER_ACRE: f64 = 2.5;

/// Fertilizer tonnage that doubles the estimate.
const FERTILIZER_DIVISOR: f64 = 20.0;

/// Lower and upper bounds of the random yield jitter.
pub const YIELD_JITTER: (f64, f64) = (0.85, 1.15);

/// Smallest estimate reported for a farm with a positive raw yield.
const MIN_REPORTED_YIELD: f64 = 0.01;

/// Yield factor for an irrigation method.
pub const fn irrigation_factor(irrigation: IrrigationType) -> f64 {
    match irrigation {
        IrrigationType::Sprinkler => 1.3,
        IrrigationType::Flood => 1.2,
        IrrigationType::RainFed => 0.8,
        IrrigationType::Manual | IrrigationType::Unknown => 1.0,
    }
}

/// Yield factor for a soil type.
pub const fn soil_factor(soil: SoilType) -> f64 {
    match soil {
        SoilType::Loamy => 1.2,
        SoilType::Silty => 1.1,
        SoilType::Peaty => 0.9,
        SoilType::Clay | SoilType::Unknown => 1.0,
    }
}

/// Yield factor for a cropping season.
pub const fn season_factor(season: Season) -> f64 {
    match season {
        Season::Kharif => 1.1,
        Season::Zaid => 0.9,
        Season::Rabi | Season::Unknown => 1.0,
    }
}

/// The deterministic part of the estimate, before jitter and rounding.
pub fn base_yield(farm: &FarmProfile) -> f64 {
    farm.area_acres
        * BASE_TONS_PER_ACRE
        * irrigation_factor(farm.irrigation)
        * soil_factor(farm.soil)
        * season_factor(farm.season)
        * (1.0 + farm.fertilizer_tons / FERTILIZER_DIVISOR)
}

/// Estimate the harvest in tons, rounded to two decimals.
///
/// Strictly positive whenever the area is positive: a raw estimate that
/// would round to zero is reported as the smallest two-decimal amount.
pub fn estimate_yield(farm: &FarmProfile, rng: &mut impl Rng) -> f64 {
    let (low, high) = YIELD_JITTER;
    let jitter = rng.random_range(low..=high);
    let raw = base_yield(farm) * jitter;
    if raw > 0.0 {
        round2(raw).max(MIN_REPORTED_YIELD)
    } else {
        round2(raw)
    }
}

/// Sample a synthetic farm profile.
pub fn simulate_farm(rng: &mut impl Rng) -> FarmProfile {
    FarmProfile {
        area_acres: round2(rng.random_range(10.0..=500.0)),
        irrigation: IrrigationType::SAMPLED
            .choose(rng)
            .copied()
            .unwrap_or(IrrigationType::Manual),
        fertilizer_tons: round2(rng.random_range(1.0..=10.0)),
        pesticide_kg: round2(rng.random_range(0.5..=10.0)),
        soil: SoilType::SAMPLED.choose(rng).copied().unwrap_or(SoilType::Loamy),
        season: Season::SAMPLED.choose(rng).copied().unwrap_or(Season::Kharif),
        water_usage_m3: round2(rng.random_range(20_000.0..=100_000.0)),
    }
}
