// Repository trait for remote noise data access
use crate::application::errors::FetchError;
use crate::domain::location::Location;
use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
use async_trait::async_trait;

#[async_trait]
pub trait NoiseRepository: Send + Sync {
    /// List every sensor location known to the remote store. Never cached:
    /// location metadata is refreshed on each call.
    async fn list_locations(&self) -> Result<Vec<Location>, FetchError>;

    /// Fetch all validated measurements for one device and metric, bounded
    /// exactly by `interval`. Implementations page through the remote API
    /// until the range is exhausted and must not widen the range.
    async fn fetch_measurements(
        &self,
        device_id: &str,
        metric: Metric,
        interval: TimeInterval,
    ) -> Result<Vec<MeasurementPoint>, FetchError>;
}
