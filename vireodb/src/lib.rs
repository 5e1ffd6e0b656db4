//! VireoDB core library.
//!
//! An in-memory time-series store for sensor readings: a fixed-size bucket
//! table addressed by sensor id residue, with range retrieval and
//! tree-backed trend analytics on top. The pieces live in
//! [`vireo_storage`] and [`vireo_index`]; this crate re-exports the public
//! surface.
//!
//! # Examples
//!
//! ```
//! use vireodb::{SensorId, SensorStore, Timestamp};
//!
//! let mut store = SensorStore::new();
//! store.add_point(SensorId(7), Timestamp::new(9, 15, 0), 21.5);
//! let stats = store.analyze(
//!     SensorId(7),
//!     Timestamp::new(9, 0, 0),
//!     Timestamp::new(10, 0, 0),
//! );
//! assert_eq!(stats.average, 21.5);
//! ```

#![deny(missing_docs)]

pub use vireo_index::{RangeAggregate, TimeTree};
pub use vireo_storage::{
    Bucket, ParseTimestampError, Reading, Result, SensorId, SensorStats, SensorStore,
    SensorTable, StoreError, Timestamp, DEFAULT_BUCKET_COUNT,
};
