// Interval cache: per-(device, metric) coverage bookkeeping for fetched ranges
//
// Each entry records which time ranges have already been fetched (the
// coverage set) together with the datapoints inside them, so the query
// planner fetches only ranges it has never seen. Coverage is kept sorted,
// disjoint and maximally coalesced: adjacent or overlapping ranges are
// merged on insert, so gap computation is a single ordered sweep.
use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    device_id: String,
    metric: Metric,
}

#[derive(Debug, Default)]
struct CacheEntry {
    /// Sorted by start; no two elements overlap or are adjacent.
    coverage: Vec<TimeInterval>,
    points: BTreeMap<DateTime<Utc>, MeasurementPoint>,
}

impl CacheEntry {
    /// Subtract the coverage set from `requested`: walk covered ranges in
    /// start order and emit every uncovered remainder as a gap.
    fn gaps(&self, requested: TimeInterval) -> Vec<TimeInterval> {
        let mut gaps = Vec::new();
        let mut cursor = requested.start;

        for covered in &self.coverage {
            if covered.end <= cursor {
                continue;
            }
            if covered.start >= requested.end {
                break;
            }
            if covered.start > cursor {
                gaps.push(TimeInterval::new(cursor, covered.start));
            }
            cursor = covered.end;
            if cursor >= requested.end {
                break;
            }
        }

        if cursor < requested.end {
            gaps.push(TimeInterval::new(cursor, requested.end));
        }

        gaps
    }

    /// Insert `interval` into the coverage set, coalescing with every
    /// existing range it overlaps or abuts.
    fn insert_coverage(&mut self, interval: TimeInterval) {
        let mut merged = interval;
        let mut kept = Vec::with_capacity(self.coverage.len() + 1);

        for existing in self.coverage.drain(..) {
            if existing.touches(&merged) {
                merged = TimeInterval::new(
                    merged.start.min(existing.start),
                    merged.end.max(existing.end),
                );
            } else {
                kept.push(existing);
            }
        }

        kept.push(merged);
        kept.sort_by_key(|i| i.start);
        self.coverage = kept;
    }
}

/// Session-scoped store of previously fetched ranges. Owned by whoever wires
/// the session together and shared by reference; independent sessions get
/// independent caches.
#[derive(Debug, Default)]
pub struct IntervalCache {
    // Outer lock only guards entry creation; each entry carries its own
    // lock, held across a whole lookup or merge, so entries for different
    // (device, metric) pairs never contend and readers never observe a
    // half-coalesced coverage set.
    entries: Mutex<HashMap<CacheKey, Arc<Mutex<CacheEntry>>>>,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, device_id: &str, metric: Metric) -> Arc<Mutex<CacheEntry>> {
        let key = CacheKey {
            device_id: device_id.to_string(),
            metric,
        };
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_default())
    }

    /// Return the known points inside `interval` together with the minimal
    /// ordered list of sub-ranges still missing from coverage.
    pub fn lookup(
        &self,
        device_id: &str,
        metric: Metric,
        interval: TimeInterval,
    ) -> (Vec<MeasurementPoint>, Vec<TimeInterval>) {
        if interval.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let entry = self.entry(device_id, metric);
        let entry = entry.lock().unwrap_or_else(PoisonError::into_inner);

        let known = entry
            .points
            .range(interval.start..interval.end)
            .map(|(_, point)| point.clone())
            .collect();

        (known, entry.gaps(interval))
    }

    /// Record a successful fetch of `interval`: extend coverage (coalescing
    /// neighbours) and store the points, newest value winning on duplicate
    /// timestamps. Re-merging an already covered interval is a no-op on
    /// coverage. Callers only merge after a fetch succeeds; a failed gap
    /// never reaches this method and so stays missing.
    pub fn merge(
        &self,
        device_id: &str,
        metric: Metric,
        interval: TimeInterval,
        points: Vec<MeasurementPoint>,
    ) {
        if interval.is_empty() {
            return;
        }

        let entry = self.entry(device_id, metric);
        let mut entry = entry.lock().unwrap_or_else(PoisonError::into_inner);

        entry.insert_coverage(interval);
        for point in points {
            // Guards the entry invariant: every stored point lies inside
            // the coverage set.
            if interval.contains(point.timestamp) {
                entry.points.insert(point.timestamp, point);
            }
        }
    }
}
