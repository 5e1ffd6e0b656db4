//! VireoDB storage layer.
//!
//! Readings live in a fixed-size table of hash buckets keyed by sensor id
//! residue ([`table::SensorTable`]); [`manager::SensorStore`] drives the
//! table and answers analytics queries through a transient
//! [`vireo_index::TimeTree`]. Everything is in memory; nothing here touches
//! disk.

#![deny(missing_docs)]

use serde::{Deserialize, Serialize};

pub mod bucket;
pub mod manager;
pub mod table;
pub mod timestamp;

pub use bucket::Bucket;
pub use manager::{Result, SensorStore, StoreError};
pub use table::{SensorId, SensorTable};
pub use timestamp::{ParseTimestampError, Timestamp};

/// Buckets a sensor table allocates when no count is given.
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// One sensor reading: a wall-clock timestamp and the measured value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// When the value was measured.
    pub timestamp: Timestamp,
    /// The measured value.
    pub value: f64,
}

impl Reading {
    /// Create a reading.
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Summary statistics over one sensor's readings in a time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorStats {
    /// Mean of the values in the window, `0.0` when the window is empty.
    pub average: f64,
    /// Smallest value in the window, `f64::MAX` when the window is empty.
    pub min: f64,
    /// Largest value in the window, `f64::MIN` when the window is empty.
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_round_trips_through_json() {
        let reading = Reading::new(Timestamp::new(12, 30, 23), 25.3);
        let encoded = serde_json::to_string(&reading).unwrap();
        let decoded: Reading = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, reading);
    }
}
