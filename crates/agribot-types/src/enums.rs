//! Enumeration types for the AgriBot backend.
//!
//! Crop labels produced by the recommender, plus the categorical columns of
//! a simulated farm profile. Farm-profile enums accept unknown labels on the
//! wire (`Unknown`) so lookup tables can fall back to a neutral factor
//! instead of rejecting the request.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

/// A crop the recommender can suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum Crop {
    Rice,
    Maize,
    Chickpea,
    Kidneybeans,
    Pigeonpeas,
    Mothbeans,
    Mungbean,
    Blackgram,
    Lentil,
    Pomegranate,
    Banana,
    Mango,
    Grapes,
    Watermelon,
    Muskmelon,
    Apple,
    Orange,
    Papaya,
    Coconut,
    Cotton,
    Jute,
    Coffee,
}

impl Crop {
    /// Every crop label, in catalogue order.
    pub const ALL: [Self; 22] = [
        Self::Rice,
        Self::Maize,
        Self::Chickpea,
        Self::Kidneybeans,
        Self::Pigeonpeas,
        Self::Mothbeans,
        Self::Mungbean,
        Self::Blackgram,
        Self::Lentil,
        Self::Pomegranate,
        Self::Banana,
        Self::Mango,
        Self::Grapes,
        Self::Watermelon,
        Self::Muskmelon,
        Self::Apple,
        Self::Orange,
        Self::Papaya,
        Self::Coconut,
        Self::Cotton,
        Self::Jute,
        Self::Coffee,
    ];

    /// The lowercase label used on the wire and in prompts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rice => "rice",
            Self::Maize => "maize",
            Self::Chickpea => "chickpea",
            Self::Kidneybeans => "kidneybeans",
            Self::Pigeonpeas => "pigeonpeas",
            Self::Mothbeans => "mothbeans",
            Self::Mungbean => "mungbean",
            Self::Blackgram => "blackgram",
            Self::Lentil => "lentil",
            Self::Pomegranate => "pomegranate",
            Self::Banana => "banana",
            Self::Mango => "mango",
            Self::Grapes => "grapes",
            Self::Watermelon => "watermelon",
            Self::Muskmelon => "muskmelon",
            Self::Apple => "apple",
            Self::Orange => "orange",
            Self::Papaya => "papaya",
            Self::Coconut => "coconut",
            Self::Cotton => "cotton",
            Self::Jute => "jute",
            Self::Coffee => "coffee",
        }
    }
}

impl core::fmt::Display for Crop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Farm profile categories
// ---------------------------------------------------------------------------

/// How a farm is irrigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum IrrigationType {
    /// Hand watering.
    Manual,
    /// Overhead sprinkler system.
    Sprinkler,
    /// Surface flooding of the field.
    Flood,
    /// No irrigation; relies on rainfall.
    #[serde(rename = "Rain-fed")]
    RainFed,
    /// A label outside the known set.
    #[serde(other)]
    Unknown,
}

impl IrrigationType {
    /// The irrigation types a simulated farm is sampled from.
    pub const SAMPLED: [Self; 4] = [Self::Manual, Self::Sprinkler, Self::Flood, Self::RainFed];
}

/// Dominant soil texture of a farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[allow(missing_docs)]
pub enum SoilType {
    Loamy,
    Clay,
    Silty,
    Peaty,
    /// A label outside the known set.
    #[serde(other)]
    Unknown,
}

impl SoilType {
    /// The soil types a simulated farm is sampled from.
    pub const SAMPLED: [Self; 4] = [Self::Loamy, Self::Clay, Self::Silty, Self::Peaty];
}

/// Indian cropping season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Monsoon season (June to October).
    Kharif,
    /// Winter season (October to March).
    Rabi,
    /// Short summer season between Rabi and Kharif.
    Zaid,
    /// A label outside the known set.
    #[serde(other)]
    Unknown,
}

impl Season {
    /// The seasons a simulated farm is sampled from.
    pub const SAMPLED: [Self; 3] = [Self::Kharif, Self::Rabi, Self::Zaid];
}
