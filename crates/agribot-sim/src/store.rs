//! Per-user last-reading store.
//!
//! The simulator itself is stateless; continuity between requests comes from
//! the caller remembering the last reading it handed each user and passing
//! it back in. [`ReadingStore`] is that memory. Concurrent requests for the
//! same user may interleave their read and write; the last write wins, which
//! is acceptable for an advisory value.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use agribot_types::{SensorReading, UserId};
use rand::Rng;

use crate::sensor::simulate_reading;

/// Keyed storage for the most recent reading of each user.
pub trait ReadingStore: Send + Sync {
    /// The last reading stored for `user`, if any.
    fn get(&self, user: UserId) -> Option<SensorReading>;

    /// Replace the stored reading for `user`.
    fn set(&self, user: UserId, reading: SensorReading);
}

/// Process-memory [`ReadingStore`] backed by a lock-guarded map.
///
/// Readings are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryReadingStore {
    readings: RwLock<HashMap<UserId, SensorReading>>,
}

impl MemoryReadingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored reading.
    pub fn len(&self) -> usize {
        self.readings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no user has a stored reading yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReadingStore for MemoryReadingStore {
    fn get(&self, user: UserId) -> Option<SensorReading> {
        self.readings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .copied()
    }

    fn set(&self, user: UserId, reading: SensorReading) {
        self.readings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user, reading);
    }
}

/// Drift `user`'s stored reading one step (or take a first sample) and store
/// the result.
pub fn advance_reading<S>(store: &S, user: UserId, rng: &mut impl Rng) -> SensorReading
where
    S: ReadingStore + ?Sized,
{
    let previous = store.get(user);
    let next = simulate_reading(previous.as_ref(), rng);
    store.set(user, next);

    tracing::debug!(
        user = %user,
        drifted = previous.is_some(),
        temperature = next.temperature,
        humidity = next.humidity,
        "sensor reading advanced"
    );

    next
}
