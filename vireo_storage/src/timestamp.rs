//! Second-resolution wall-clock timestamps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A time of day, compared lexicographically by (hour, minute, second).
///
/// The derived `Ord` compares fields in declaration order, which is exactly
/// the ordering every range operation in the store is defined against.
/// Components are plain counters, not validated wall-clock values; callers
/// are expected to pass sane input and out-of-range components simply sort
/// where the lexicographic rule puts them.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp {
    /// Hour component.
    pub hour: u32,
    /// Minute component.
    pub minute: u32,
    /// Second component.
    pub second: u32,
}

impl Timestamp {
    /// Build a timestamp from components. No range checks are performed.
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Error from parsing a `HH:MM:SS` string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseTimestampError {
    /// The string did not split into exactly three `:`-separated fields.
    #[error("expected HH:MM:SS, got {0:?}")]
    Malformed(String),
    /// A field was not an unsigned number.
    #[error("invalid timestamp component {0:?}")]
    InvalidComponent(String),
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(hour), Some(minute), Some(second), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseTimestampError::Malformed(s.to_string()));
        };
        let component = |field: &str| {
            field
                .parse::<u32>()
                .map_err(|_| ParseTimestampError::InvalidComponent(field.to_string()))
        };
        Ok(Self::new(component(hour)?, component(minute)?, component(second)?))
    }
}
