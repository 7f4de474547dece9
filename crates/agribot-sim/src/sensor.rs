//! Synthetic environmental sensor readings.
//!
//! A reading has seven fields, each with a fixed valid range and a maximum
//! per-step drift:
//!
//! | Field        | Min | Max | Delta |
//! |--------------|-----|-----|-------|
//! | N            |   0 | 140 |   3   |
//! | P            |   5 | 145 |   3   |
//! | K            |   5 | 205 |   4   |
//! | temperature  |  10 |  40 |  0.5  |
//! | humidity     |  30 |  98 |   2   |
//! | ph           |   4 |   9 |  0.1  |
//! | rainfall     |  20 | 300 |   5   |
//!
//! With no previous reading every field is drawn uniformly from its range.
//! Otherwise each field moves by a uniform step in `[-delta, +delta]` and is
//! clamped back into range, so consecutive readings for the same user look
//! like a slowly wandering sensor rather than independent noise. Values are
//! rounded to two decimals in both cases.

use agribot_types::SensorReading;
use rand::Rng;

use crate::round2;

/// One of the seven fields of a [`SensorReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorField {
    /// Soil nitrogen.
    N,
    /// Soil phosphorus.
    P,
    /// Soil potassium.
    K,
    /// Air temperature.
    Temperature,
    /// Relative humidity.
    Humidity,
    /// Soil pH.
    Ph,
    /// Rainfall.
    Rainfall,
}

impl SensorField {
    /// All fields in wire order.
    pub const ALL: [Self; 7] = [
        Self::N,
        Self::P,
        Self::K,
        Self::Temperature,
        Self::Humidity,
        Self::Ph,
        Self::Rainfall,
    ];

    /// Inclusive `(min, max)` bounds for this field.
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, 140.0),
            Self::P => (5.0, 145.0),
            Self::K => (5.0, 205.0),
            Self::Temperature => (10.0, 40.0),
            Self::Humidity => (30.0, 98.0),
            Self::Ph => (4.0, 9.0),
            Self::Rainfall => (20.0, 300.0),
        }
    }

    /// Largest absolute change a single drift step may apply.
    pub const fn delta(self) -> f64 {
        match self {
            Self::N | Self::P => 3.0,
            Self::K => 4.0,
            Self::Temperature => 0.5,
            Self::Humidity => 2.0,
            Self::Ph => 0.1,
            Self::Rainfall => 5.0,
        }
    }

    /// Read this field from a reading.
    pub const fn get(self, reading: &SensorReading) -> f64 {
        match self {
            Self::N => reading.n,
            Self::P => reading.p,
            Self::K => reading.k,
            Self::Temperature => reading.temperature,
            Self::Humidity => reading.humidity,
            Self::Ph => reading.ph,
            Self::Rainfall => reading.rainfall,
        }
    }

    /// Overwrite this field on a reading.
    pub const fn set(self, reading: &mut SensorReading, value: f64) {
        match self {
            Self::N => reading.n = value,
            Self::P => reading.p = value,
            Self::K => reading.k = value,
            Self::Temperature => reading.temperature = value,
            Self::Humidity => reading.humidity = value,
            Self::Ph => reading.ph = value,
            Self::Rainfall => reading.rainfall = value,
        }
    }

    /// Whether `value` lies inside this field's bounds.
    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }
}

/// Produce the next reading for a sensor.
///
/// `previous` is the last reading handed out for the same user, if any.
/// The result always satisfies every field's bounds.
pub fn simulate_reading(previous: Option<&SensorReading>, rng: &mut impl Rng) -> SensorReading {
    let mut next = previous.copied().unwrap_or(SensorReading {
        n: 0.0,
        p: 0.0,
        k: 0.0,
        temperature: 0.0,
        humidity: 0.0,
        ph: 0.0,
        rainfall: 0.0,
    });

    for field in SensorField::ALL {
        let (min, max) = field.bounds();
        let value = match previous {
            None => rng.random_range(min..=max),
            Some(last) => {
                let delta = field.delta();
                let step = rng.random_range(-delta..=delta);
                (field.get(last) + step).clamp(min, max)
            }
        };
        field.set(&mut next, round2(value));
    }

    next
}
