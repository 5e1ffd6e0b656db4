//! Fixed-size bucketed index keyed by sensor id residue.

use serde::{Deserialize, Serialize};

use crate::bucket::Bucket;
use crate::DEFAULT_BUCKET_COUNT;

/// Identifier of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorId(pub u64);

/// The bucket table: every sensor maps to the slot at
/// `sensor_id mod bucket_count`.
///
/// The table never grows or rehashes. Sensor ids sharing a residue share a
/// bucket, and because readings carry no sensor tag their entries
/// interleave: queries against either id see the union. That aliasing is a
/// documented property of the addressing scheme, not an accident, and the
/// tests pin it down.
#[derive(Debug, Clone)]
pub struct SensorTable {
    buckets: Vec<Bucket>,
}

impl Default for SensorTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

impl SensorTable {
    /// Create a table with `bucket_count` pre-allocated empty buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn new(bucket_count: usize) -> Self {
        assert!(bucket_count > 0, "table needs at least one bucket");
        Self {
            buckets: vec![Bucket::new(); bucket_count],
        }
    }

    /// Index of the bucket `sensor` maps to.
    pub fn residue(&self, sensor: SensorId) -> usize {
        (sensor.0 % self.buckets.len() as u64) as usize
    }

    /// The bucket `sensor` maps to. Slots are pre-allocated, so this is
    /// total.
    pub fn bucket(&self, sensor: SensorId) -> &Bucket {
        &self.buckets[self.residue(sensor)]
    }

    /// Mutable handle to the bucket `sensor` maps to.
    pub fn bucket_mut(&mut self, sensor: SensorId) -> &mut Bucket {
        let idx = self.residue(sensor);
        &mut self.buckets[idx]
    }

    /// Number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
