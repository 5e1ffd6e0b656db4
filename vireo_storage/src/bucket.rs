//! Per-slot reading lists.

use std::collections::VecDeque;

use crate::{Reading, Timestamp};

/// The readings stored under one table slot, newest first.
///
/// Insertion prepends in O(1); every lookup is a linear scan from the most
/// recent reading backwards. The bucket itself accepts duplicate
/// timestamps without complaint, so keeping timestamps unique per sensor
/// is the caller's job.
#[derive(Debug, Default, Clone)]
pub struct Bucket {
    readings: VecDeque<Reading>,
}

impl Bucket {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a reading.
    pub fn push(&mut self, timestamp: Timestamp, value: f64) {
        self.readings.push_front(Reading::new(timestamp, value));
    }

    /// Remove the first reading carrying `timestamp`.
    ///
    /// Returns whether one was removed; a missing timestamp is a no-op,
    /// not an error.
    pub fn remove(&mut self, timestamp: Timestamp) -> bool {
        match self.readings.iter().position(|r| r.timestamp == timestamp) {
            Some(pos) => {
                self.readings.remove(pos);
                true
            }
            None => false,
        }
    }

    /// First reading carrying `timestamp`, if any.
    pub fn find(&self, timestamp: Timestamp) -> Option<&Reading> {
        self.readings.iter().find(|r| r.timestamp == timestamp)
    }

    /// Mutable handle to the first reading carrying `timestamp`, if any.
    pub fn find_mut(&mut self, timestamp: Timestamp) -> Option<&mut Reading> {
        self.readings.iter_mut().find(|r| r.timestamp == timestamp)
    }

    /// Drop every reading strictly older than `cutoff`.
    ///
    /// Readings stamped exactly `cutoff` survive. Returns how many were
    /// dropped.
    pub fn remove_older_than(&mut self, cutoff: Timestamp) -> usize {
        let before = self.readings.len();
        self.readings.retain(|r| r.timestamp >= cutoff);
        before - self.readings.len()
    }

    /// Iterate the readings, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    /// Number of readings held.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the bucket holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(minute: u32) -> Timestamp {
        Timestamp::new(12, minute, 0)
    }

    #[test]
    fn push_keeps_newest_first() {
        let mut bucket = Bucket::new();
        bucket.push(ts(1), 1.0);
        bucket.push(ts(2), 2.0);
        bucket.push(ts(3), 3.0);
        let minutes: Vec<u32> = bucket.iter().map(|r| r.timestamp.minute).collect();
        assert_eq!(minutes, vec![3, 2, 1]);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut bucket = Bucket::new();
        bucket.push(ts(1), 1.0);
        bucket.push(ts(1), 2.0);
        assert!(bucket.remove(ts(1)));
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.find(ts(1)).map(|r| r.value), Some(1.0));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut bucket = Bucket::new();
        bucket.push(ts(1), 1.0);
        assert!(!bucket.remove(ts(9)));
        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut bucket = Bucket::new();
        bucket.push(ts(5), 5.0);
        bucket.find_mut(ts(5)).unwrap().value = 9.0;
        assert_eq!(bucket.find(ts(5)).map(|r| r.value), Some(9.0));
        assert!(bucket.find_mut(ts(6)).is_none());
    }

    #[test]
    fn remove_older_than_is_strict() {
        let mut bucket = Bucket::new();
        bucket.push(ts(1), 1.0);
        bucket.push(ts(2), 2.0);
        bucket.push(ts(3), 3.0);
        assert_eq!(bucket.remove_older_than(ts(2)), 1);
        let minutes: Vec<u32> = bucket.iter().map(|r| r.timestamp.minute).collect();
        // The reading at exactly 12:02:00 stays.
        assert_eq!(minutes, vec![3, 2]);
    }

    #[test]
    fn empty_bucket_reports_empty() {
        let mut bucket = Bucket::new();
        assert!(bucket.is_empty());
        bucket.push(ts(1), 1.0);
        assert!(!bucket.is_empty());
        assert_eq!(bucket.remove_older_than(ts(59)), 1);
        assert!(bucket.is_empty());
    }
}
