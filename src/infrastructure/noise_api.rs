// Noise API client - remote store adapter over HTTP
use crate::application::errors::FetchError;
use crate::application::noise_repository::NoiseRepository;
use crate::domain::location::Location;
use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
use crate::infrastructure::schema::{
    validate_location, validate_measurement, RawLocationsPayload, RawMeasurement,
    RawMeasurementsPayload,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct NoiseApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    page_size: usize,
}

fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Transport(e.to_string())
}

/// Validate one page of raw records and append them to `points`. Fails fast
/// on the first invalid record, so a bad page aborts the whole gap rather
/// than silently dropping rows.
fn append_page(
    measurements: &[RawMeasurement],
    device_id: &str,
    interval: TimeInterval,
    points: &mut Vec<MeasurementPoint>,
) -> Result<(), FetchError> {
    for raw in measurements {
        let point = validate_measurement(raw, device_id)?;
        // The cache invariant (points within coverage) outranks trusting
        // the server's range filtering.
        if interval.contains(point.timestamp) {
            points.push(point);
        } else {
            tracing::debug!(
                device_id,
                "dropping out-of-range point at {}",
                point.timestamp
            );
        }
    }
    Ok(())
}

impl NoiseApiClient {
    pub fn new(base_url: String, token: String, page_size: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            page_size,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(transport)?;

        tracing::debug!("GET {}", response.url());

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport(format!(
                "request failed with status {status}: {body}"
            )));
        }

        response.json::<T>().await.map_err(transport)
    }
}

#[async_trait]
impl NoiseRepository for NoiseApiClient {
    async fn list_locations(&self) -> Result<Vec<Location>, FetchError> {
        let url = format!("{}/locations", self.base_url);
        let payload: RawLocationsPayload = self.get_json(&url, &[]).await?;

        let locations = payload
            .locations
            .iter()
            .map(validate_location)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locations)
    }

    async fn fetch_measurements(
        &self,
        device_id: &str,
        metric: Metric,
        interval: TimeInterval,
    ) -> Result<Vec<MeasurementPoint>, FetchError> {
        let url = format!("{}/locations/{}/noise", self.base_url, device_id);
        let mut points = Vec::new();
        let mut page = 0usize;

        loop {
            let params = [
                ("metric", metric.as_str().to_string()),
                ("start", interval.start.to_rfc3339()),
                ("end", interval.end.to_rfc3339()),
                ("page", page.to_string()),
                ("page_size", self.page_size.to_string()),
            ];
            let payload: RawMeasurementsPayload = self.get_json(&url, &params).await?;

            // Only an empty page proves pagination is exhausted; a short
            // non-empty page is not trusted as final.
            if payload.measurements.is_empty() {
                break;
            }

            append_page(&payload.measurements, device_id, interval, &mut points)?;
            page += 1;
        }

        tracing::debug!(
            device_id,
            %metric,
            "{} rows loaded over {} page(s) for range {}",
            points.len(),
            page + 1,
            interval
        );

        Ok(points)
    }
}
