//! Simulated wholesale market quotes.
//!
//! Each crop has a reference price per quintal; unknown crops use 3000.
//! Every market in [`MARKETS`] quotes that price scaled by a uniform factor
//! in `[0.8, 1.2]`, and the five highest quotes are returned, most
//! expensive first. Prices are [`Decimal`] so sorting is exact and the two
//! decimal places survive serialization unchanged.
//!
//! The relevance `score` is drawn independently of the price and plays no
//! part in the ordering.

use agribot_types::MarketQuote;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Number of quotes returned per request.
pub const QUOTE_COUNT: usize = 5;

/// Reference price for crops missing from [`BASE_PRICES`].
pub const DEFAULT_BASE_PRICE: i64 = 3000;

/// Markets that quote every crop.
pub const MARKETS: [&str; 10] = [
    "Delhi Azadpur Market",
    "Mumbai APMC",
    "Bangalore Market",
    "Chennai Koyambedu",
    "Hyderabad Market",
    "Pune Market",
    "Kolkata Market",
    "Ahmedabad Market",
    "Jaipur Market",
    "Lucknow Market",
];

/// Reference prices keyed by lowercase crop name.
const BASE_PRICES: [(&str, i64); 12] = [
    ("rice", 2500),
    ("wheat", 2200),
    ("maize", 1800),
    ("cotton", 5500),
    ("sugarcane", 300),
    ("banana", 1200),
    ("mango", 2800),
    ("apple", 8000),
    ("grapes", 4500),
    ("pomegranate", 6000),
    ("chickpea", 4800),
    ("lentil", 5200),
];

/// Range of the per-market price factor.
const PRICE_JITTER: (f64, f64) = (0.8, 1.2);

/// Range of the relevance score.
const SCORE_RANGE: (f64, f64) = (0.6, 1.0);

/// Reference price for a crop name, matched case-insensitively.
pub fn base_price(crop_name: &str) -> Decimal {
    let key = crop_name.trim().to_lowercase();
    let price = BASE_PRICES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(DEFAULT_BASE_PRICE, |&(_, price)| price);
    Decimal::from(price)
}

/// Quote `crop_name` at every market and keep the [`QUOTE_COUNT`] highest.
pub fn market_quotes(crop_name: &str, rng: &mut impl Rng) -> Vec<MarketQuote> {
    let base = base_price(crop_name);
    let (jitter_low, jitter_high) = PRICE_JITTER;
    let (score_low, score_high) = SCORE_RANGE;

    let mut quotes: Vec<MarketQuote> = MARKETS
        .iter()
        .map(|&market| {
            let factor = Decimal::from_f64(rng.random_range(jitter_low..=jitter_high))
                .unwrap_or(Decimal::ONE);
            let avg_price = base.checked_mul(factor).unwrap_or(base).round_dp(2);
            MarketQuote {
                market: market.to_owned(),
                avg_price,
                score: rng.random_range(score_low..=score_high),
            }
        })
        .collect();

    quotes.sort_by(|a, b| b.avg_price.cmp(&a.avg_price));
    quotes.truncate(QUOTE_COUNT);

    tracing::debug!(crop = crop_name, %base, "market quotes generated");
    quotes
}
