// Measurement domain models: metric kinds, datapoints, time intervals
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate decibel quantity reported per fixed five-minute bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MinDba,
    MaxDba,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::MinDba => "min_dba",
            Metric::MaxDba => "max_dba",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated five-minute interval reading for a device.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementPoint {
    pub device_id: String,
    /// Start of the measurement bucket.
    pub timestamp: DateTime<Utc>,
    pub min_dba: f64,
    pub max_dba: f64,
}

impl MeasurementPoint {
    pub fn value_for(&self, metric: Metric) -> f64 {
        match metric {
            Metric::MinDba => self.min_dba,
            Metric::MaxDba => self.max_dba,
        }
    }
}

/// Half-open time range [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// An interval with start >= end covers no instant.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp < self.end
    }

    /// True when the intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when one interval ends exactly where the other starts.
    pub fn is_adjacent_to(&self, other: &TimeInterval) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Overlapping or adjacent intervals coalesce into one.
    pub fn touches(&self, other: &TimeInterval) -> bool {
        self.overlaps(other) || self.is_adjacent_to(other)
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.to_rfc3339(),
            self.end.to_rfc3339()
        )
    }
}
