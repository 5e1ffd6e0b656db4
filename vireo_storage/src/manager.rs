//! The sensor data manager.
//!
//! [`SensorStore`] owns the bucket table and exposes the store's public
//! operations: recording, updating and expiring readings, exclusive-bound
//! retrieval, and inclusive-bound trend analysis. Analysis builds a
//! throwaway [`TimeTree`] from the sensor's current bucket on every call;
//! the tree never outlives the query.

use thiserror::Error;
use tracing::{debug, trace};

use vireo_index::TimeTree;

use crate::table::{SensorId, SensorTable};
use crate::{Reading, SensorStats, Timestamp, DEFAULT_BUCKET_COUNT};

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A caller-supplied output buffer cannot hold every matching reading.
    #[error("output buffer holds {capacity} readings but {needed} matched")]
    CapacityExceeded {
        /// Readings that matched the query.
        needed: usize,
        /// Slots the caller supplied.
        capacity: usize,
    },
}

/// In-memory store of sensor readings.
///
/// Readings are bucketed by sensor id residue, newest first within a
/// bucket. Note the two range contracts: [`retrieve`](Self::retrieve)
/// excludes both bounds while [`analyze`](Self::analyze) includes them.
///
/// # Examples
///
/// ```
/// use vireo_storage::{SensorId, SensorStore, Timestamp};
///
/// let mut store = SensorStore::new();
/// store.add_point(SensorId(1), Timestamp::new(12, 30, 23), 25.3);
/// store.add_point(SensorId(1), Timestamp::new(12, 33, 3), 26.1);
/// store.add_point(SensorId(1), Timestamp::new(12, 35, 43), 24.8);
///
/// let readings = store.retrieve(
///     SensorId(1),
///     Timestamp::new(12, 30, 0),
///     Timestamp::new(12, 35, 0),
/// );
/// assert_eq!(readings.len(), 2);
///
/// let stats = store.analyze(
///     SensorId(1),
///     Timestamp::new(12, 30, 0),
///     Timestamp::new(12, 50, 0),
/// );
/// assert_eq!(stats.min, 24.8);
/// assert_eq!(stats.max, 26.1);
/// ```
#[derive(Debug, Clone)]
pub struct SensorStore {
    table: SensorTable,
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorStore {
    /// Create a store with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Create a store with a custom bucket count.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self {
            table: SensorTable::new(bucket_count),
        }
    }

    /// Record a reading for `sensor`.
    ///
    /// A reading already stored at exactly `timestamp` is replaced, so
    /// timestamps stay unique within a sensor's bucket.
    pub fn add_point(&mut self, sensor: SensorId, timestamp: Timestamp, value: f64) {
        let bucket = self.table.bucket_mut(sensor);
        if bucket.remove(timestamp) {
            trace!(sensor = sensor.0, %timestamp, "replacing reading");
        }
        bucket.push(timestamp, value);
        trace!(sensor = sensor.0, %timestamp, value, "added reading");
    }

    /// Overwrite the value of the reading stamped exactly `timestamp`.
    ///
    /// A missing reading is a silent no-op: nothing is created and nothing
    /// is reported.
    pub fn update_point(&mut self, sensor: SensorId, timestamp: Timestamp, value: f64) {
        if let Some(reading) = self.table.bucket_mut(sensor).find_mut(timestamp) {
            reading.value = value;
            trace!(sensor = sensor.0, %timestamp, value, "updated reading");
        }
    }

    /// Drop every reading of `sensor` strictly older than `cutoff`.
    ///
    /// A reading stamped exactly `cutoff` survives.
    pub fn delete_before(&mut self, sensor: SensorId, cutoff: Timestamp) {
        let removed = self.table.bucket_mut(sensor).remove_older_than(cutoff);
        debug!(sensor = sensor.0, %cutoff, removed, "expired readings");
    }

    /// Every reading with `start < timestamp < end`, newest first.
    ///
    /// Both bounds are exclusive; readings stamped exactly `start` or
    /// `end` are not returned.
    pub fn retrieve(&self, sensor: SensorId, start: Timestamp, end: Timestamp) -> Vec<Reading> {
        self.table
            .bucket(sensor)
            .iter()
            .filter(|r| r.timestamp > start && r.timestamp < end)
            .copied()
            .collect()
    }

    /// Like [`retrieve`](Self::retrieve), but writing into a
    /// caller-supplied buffer.
    ///
    /// Returns the number of readings written. When more readings match
    /// than `out` can hold, the call fails with
    /// [`StoreError::CapacityExceeded`] instead of truncating; the buffer
    /// contents are unspecified on error.
    pub fn retrieve_into(
        &self,
        sensor: SensorId,
        start: Timestamp,
        end: Timestamp,
        out: &mut [Reading],
    ) -> Result<usize> {
        let mut needed = 0;
        for reading in self.table.bucket(sensor).iter() {
            if reading.timestamp > start && reading.timestamp < end {
                if needed < out.len() {
                    out[needed] = *reading;
                }
                needed += 1;
            }
        }
        if needed > out.len() {
            return Err(StoreError::CapacityExceeded {
                needed,
                capacity: out.len(),
            });
        }
        Ok(needed)
    }

    /// Average, minimum and maximum over readings with
    /// `start <= timestamp <= end`.
    ///
    /// Both bounds are inclusive, unlike [`retrieve`](Self::retrieve). An
    /// empty window yields an average of `0.0` and the sentinel extrema
    /// `f64::MAX` / `f64::MIN`.
    pub fn analyze(&self, sensor: SensorId, start: Timestamp, end: Timestamp) -> SensorStats {
        let mut tree = TimeTree::new();
        for reading in self.table.bucket(sensor).iter() {
            tree.insert(reading.timestamp, reading.value);
        }
        let agg = tree.aggregate_range(start, end);
        debug!(sensor = sensor.0, %start, %end, count = agg.count, "analyzed window");
        SensorStats {
            average: agg.average(),
            min: agg.min,
            max: agg.max,
        }
    }

    /// Number of readings in the bucket `sensor` maps to.
    ///
    /// Colliding sensors share a bucket, so their readings are counted
    /// together.
    pub fn reading_count(&self, sensor: SensorId) -> usize {
        self.table.bucket(sensor).len()
    }

    /// Number of buckets the store was built with.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }
}
