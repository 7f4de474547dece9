//! Rule-based crop recommendation.
//!
//! Rules are evaluated in a fixed priority order and the first one that
//! fires decides the candidate set; the recommendation is a uniform pick
//! from that set. When no rule fires, the pick is uniform over every crop.
//!
//! | Priority | Rule                   | Condition                                     | Candidates               |
//! |----------|------------------------|-----------------------------------------------|--------------------------|
//! | 1        | Hot, humid, wet        | temperature > 30, humidity > 80, rainfall > 200 | rice, jute, coconut     |
//! | 2        | Cool and dry           | temperature < 20, rainfall < 100              | apple, grapes, pomegranate |
//! | 3        | Alkaline, high N       | ph > 7, N > 80                                | maize, cotton, banana    |
//! | 4        | Dry and hot            | humidity < 50, temperature > 25               | mango, orange, watermelon |
//! | 5        | Fallback               | always                                        | all crops                |

use agribot_types::{Crop, SensorReading};
use rand::Rng;
use rand::seq::IndexedRandom;

/// The rule that decided a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropRule {
    /// Tropical conditions suited to paddy and plantation crops.
    HotHumidWet,
    /// Temperate, low-rainfall conditions suited to orchard fruit.
    CoolDry,
    /// Alkaline, nitrogen-rich soil.
    AlkalineHighNitrogen,
    /// Arid heat suited to drought-tolerant fruit.
    DryHot,
    /// No rule fired.
    Fallback,
}

impl CropRule {
    /// Rules in evaluation order.
    pub const PRIORITY: [Self; 5] = [
        Self::HotHumidWet,
        Self::CoolDry,
        Self::AlkalineHighNitrogen,
        Self::DryHot,
        Self::Fallback,
    ];

    /// Whether this rule fires for `reading`.
    pub fn matches(self, reading: &SensorReading) -> bool {
        match self {
            Self::HotHumidWet => {
                reading.temperature > 30.0 && reading.humidity > 80.0 && reading.rainfall > 200.0
            }
            Self::CoolDry => reading.temperature < 20.0 && reading.rainfall < 100.0,
            Self::AlkalineHighNitrogen => reading.ph > 7.0 && reading.n > 80.0,
            Self::DryHot => reading.humidity < 50.0 && reading.temperature > 25.0,
            Self::Fallback => true,
        }
    }

    /// Crops this rule picks from.
    pub const fn candidates(self) -> &'static [Crop] {
        match self {
            Self::HotHumidWet => &[Crop::Rice, Crop::Jute, Crop::Coconut],
            Self::CoolDry => &[Crop::Apple, Crop::Grapes, Crop::Pomegranate],
            Self::AlkalineHighNitrogen => &[Crop::Maize, Crop::Cotton, Crop::Banana],
            Self::DryHot => &[Crop::Mango, Crop::Orange, Crop::Watermelon],
            Self::Fallback => &Crop::ALL,
        }
    }
}

/// The first rule, in priority order, that fires for `reading`.
pub fn matching_rule(reading: &SensorReading) -> CropRule {
    CropRule::PRIORITY
        .into_iter()
        .find(|rule| rule.matches(reading))
        .unwrap_or(CropRule::Fallback)
}

/// Recommend a crop for the given conditions.
pub fn recommend_crop(reading: &SensorReading, rng: &mut impl Rng) -> Crop {
    let rule = matching_rule(reading);
    let crop = rule
        .candidates()
        .choose(rng)
        .copied()
        .unwrap_or(Crop::Rice);
    tracing::debug!(?rule, %crop, "crop recommended");
    crop
}
