//! Data records exchanged between the simulator, the advisor, and the API.
//!
//! None of these carry a durable identity except [`User`] and
//! [`StatusCheck`]; readings, farm profiles, and quotes are recreated on
//! every request. Field names on the wire follow the dashboard's existing
//! contract (dataset column names for farm data, `PascalCase` for quotes).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{IrrigationType, Season, SoilType};
use crate::ids::{StatusCheckId, UserId};

// ---------------------------------------------------------------------------
// Sensor reading
// ---------------------------------------------------------------------------

/// A snapshot of the seven simulated environmental sensor values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SensorReading {
    /// Soil nitrogen (kg/ha).
    #[serde(rename = "N")]
    pub n: f64,
    /// Soil phosphorus (kg/ha).
    #[serde(rename = "P")]
    pub p: f64,
    /// Soil potassium (kg/ha).
    #[serde(rename = "K")]
    pub k: f64,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Soil pH.
    pub ph: f64,
    /// Rainfall in millimetres.
    pub rainfall: f64,
}

// ---------------------------------------------------------------------------
// Farm profile
// ---------------------------------------------------------------------------

/// Synthetic farm parameters fed to the yield estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FarmProfile {
    /// Cultivated area in acres.
    #[serde(rename = "Farm_Area(acres)")]
    pub area_acres: f64,
    /// Irrigation method.
    #[serde(rename = "Irrigation_Type")]
    pub irrigation: IrrigationType,
    /// Fertilizer applied this season, in tons.
    #[serde(rename = "Fertilizer_Used(tons)")]
    pub fertilizer_tons: f64,
    /// Pesticide applied this season, in kilograms.
    #[serde(rename = "Pesticide_Used(kg)")]
    pub pesticide_kg: f64,
    /// Dominant soil texture.
    #[serde(rename = "Soil_Type")]
    pub soil: SoilType,
    /// Cropping season.
    #[serde(rename = "Season")]
    pub season: Season,
    /// Water consumed this season, in cubic metres.
    #[serde(rename = "Water_Usage(cubic meters)")]
    pub water_usage_m3: f64,
}

// ---------------------------------------------------------------------------
// Market quote
// ---------------------------------------------------------------------------

/// A simulated wholesale price for a crop at one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketQuote {
    /// Market name.
    #[serde(rename = "Market")]
    pub market: String,
    /// Average price per quintal, rounded to 2 decimal places.
    #[serde(rename = "AvgPrice", with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub avg_price: Decimal,
    /// Relevance score in `[0.6, 1.0]`. Independent of the price.
    #[serde(rename = "Score")]
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Weather forecast
// ---------------------------------------------------------------------------

/// One day of a 5-day weather forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ForecastDay {
    /// Weekday name (e.g. `Monday`).
    pub day: String,
    /// Calendar date as `YYYY-MM-DD`.
    pub date: String,
    /// Temperature in degrees Celsius, one decimal place.
    pub temp: f64,
    /// Relative humidity in percent.
    pub humidity: u32,
    /// Title-cased condition text.
    pub description: String,
    /// Provider icon code.
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Users and status checks
// ---------------------------------------------------------------------------

/// A registered user as exposed by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, stored lowercased.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
}

/// A client heartbeat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatusCheck {
    /// Unique record identifier.
    pub id: StatusCheckId,
    /// Name the client reported.
    pub client_name: String,
    /// When the check was recorded.
    pub timestamp: DateTime<Utc>,
}
