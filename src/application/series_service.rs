// Series service - the query planner behind every view change
//
// Minimal-fetch policy: the remote store is metered, so each resolve fetches
// only the sub-ranges the interval cache has never covered, merges whatever
// those fetches return, and answers from the cache.
use crate::application::errors::{DataUnavailable, FetchError};
use crate::application::interval_cache::IntervalCache;
use crate::application::noise_repository::NoiseRepository;
use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
use crate::domain::series::assemble;
use futures::future::join_all;
use std::sync::Arc;

/// One gap fetch that failed. Other gaps and existing cache contents are
/// unaffected; the range stays missing for the next resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapFailure {
    pub interval: TimeInterval,
    pub error: FetchError,
}

/// Outcome of a resolve call. Non-empty `failures` is the partial-data
/// warning: the points cover everything except the named ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSeries {
    pub points: Vec<MeasurementPoint>,
    pub failures: Vec<GapFailure>,
}

impl ResolvedSeries {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// The sub-ranges the series is missing data for.
    pub fn missing_ranges(&self) -> Vec<TimeInterval> {
        self.failures.iter().map(|f| f.interval).collect()
    }
}

#[derive(Clone)]
pub struct SeriesService {
    repository: Arc<dyn NoiseRepository>,
    cache: Arc<IntervalCache>,
}

impl SeriesService {
    pub fn new(repository: Arc<dyn NoiseRepository>, cache: Arc<IntervalCache>) -> Self {
        Self { repository, cache }
    }

    /// Produce the ordered, gap-free-where-possible series for one
    /// (device, metric, range) request. Gap fetches run concurrently and
    /// fail independently; merges serialize on the cache entry.
    pub async fn resolve(
        &self,
        device_id: &str,
        metric: Metric,
        interval: TimeInterval,
    ) -> Result<ResolvedSeries, DataUnavailable> {
        let (known, gaps) = self.cache.lookup(device_id, metric, interval);

        if gaps.is_empty() {
            tracing::debug!(
                device_id,
                %metric,
                "range {} served entirely from cache ({} points)",
                interval,
                known.len()
            );
            return Ok(ResolvedSeries {
                points: assemble(known, interval),
                failures: Vec::new(),
            });
        }

        // True when the cache held nothing at all inside the request.
        let uncovered = gaps.len() == 1 && gaps[0] == interval;

        tracing::debug!(
            device_id,
            %metric,
            "range {} needs {} gap fetch(es)",
            interval,
            gaps.len()
        );

        // Gaps are disjoint, so their fetches can run concurrently;
        // dispatch order is chronological for predictable partial results.
        let fetches = gaps
            .iter()
            .map(|gap| self.repository.fetch_measurements(device_id, metric, *gap));
        let results = join_all(fetches).await;

        let mut failures = Vec::new();
        let mut any_success = false;
        for (gap, result) in gaps.iter().zip(results) {
            match result {
                Ok(points) => {
                    tracing::debug!(
                        device_id,
                        %metric,
                        "fetched {} points for gap {}",
                        points.len(),
                        gap
                    );
                    self.cache.merge(device_id, metric, *gap, points);
                    any_success = true;
                }
                Err(error) => {
                    tracing::warn!(device_id, %metric, "gap fetch {} failed: {}", gap, error);
                    failures.push(GapFailure {
                        interval: *gap,
                        error,
                    });
                }
            }
        }

        if !any_success && uncovered {
            return Err(DataUnavailable {
                device_id: device_id.to_string(),
                metric,
                interval,
                causes: failures.into_iter().map(|f| f.error).collect(),
            });
        }

        let (points, _) = self.cache.lookup(device_id, metric, interval);
        Ok(ResolvedSeries {
            points: assemble(points, interval),
            failures,
        })
    }
}
