// Series assembly: ordered, de-duplicated datapoints restricted to a range
use super::measurement::{MeasurementPoint, TimeInterval};
use std::collections::BTreeMap;

/// Build the series handed back to presentation collaborators: ascending by
/// timestamp, restricted to `interval`, one point per timestamp (the last
/// occurrence wins, matching cache merge order). An empty result means the
/// range holds no data, not that anything failed.
pub fn assemble(
    points: impl IntoIterator<Item = MeasurementPoint>,
    interval: TimeInterval,
) -> Vec<MeasurementPoint> {
    let mut by_timestamp = BTreeMap::new();
    for point in points {
        if interval.contains(point.timestamp) {
            by_timestamp.insert(point.timestamp, point);
        }
    }
    by_timestamp.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn point(minute: u32, max_dba: f64) -> MeasurementPoint {
        MeasurementPoint {
            device_id: "d1".to_string(),
            timestamp: ts(minute),
            min_dba: 40.0,
            max_dba,
        }
    }

    #[test]
    fn test_sorts_and_restricts() {
        let interval = TimeInterval::new(ts(10), ts(30));
        let series = assemble(vec![point(25, 70.0), point(5, 60.0), point(10, 65.0)], interval);

        let minutes: Vec<_> = series.iter().map(|p| p.timestamp).collect();
        assert_eq!(minutes, vec![ts(10), ts(25)]);
    }

    #[test]
    fn test_end_is_exclusive() {
        let interval = TimeInterval::new(ts(10), ts(30));
        let series = assemble(vec![point(30, 70.0)], interval);
        assert!(series.is_empty());
    }

    #[test]
    fn test_duplicate_timestamps_last_wins() {
        let interval = TimeInterval::new(ts(0), ts(59));
        let series = assemble(vec![point(10, 60.0), point(10, 75.0)], interval);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].max_dba, 75.0);
    }

    #[test]
    fn test_no_points_in_range_is_empty_not_error() {
        let interval = TimeInterval::new(ts(40), ts(50));
        let series = assemble(vec![point(10, 60.0)], interval);
        assert!(series.is_empty());
    }
}
