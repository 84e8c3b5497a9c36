// HTTP request handlers
use crate::domain::location::Location;
use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SeriesQuery {
    pub metric: Metric,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct LocationDto {
    pub id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: i32,
    pub active: bool,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            label: l.label,
            latitude: l.latitude,
            longitude: l.longitude,
            radius: l.radius,
            active: l.active,
        }
    }
}

#[derive(Serialize)]
pub struct PointDto {
    pub timestamp: DateTime<Utc>,
    pub min_dba: f64,
    pub max_dba: f64,
}

impl From<MeasurementPoint> for PointDto {
    fn from(p: MeasurementPoint) -> Self {
        Self {
            timestamp: p.timestamp,
            min_dba: p.min_dba,
            max_dba: p.max_dba,
        }
    }
}

#[derive(Serialize)]
pub struct SeriesResponse {
    pub points: Vec<PointDto>,
    /// Sub-ranges the series is missing because their fetch failed.
    /// Empty for a complete series.
    pub missing: Vec<TimeInterval>,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all sensor locations (always a fresh fetch)
pub async fn list_locations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.location_service.list_locations().await {
        Ok(locations) => {
            let body: Vec<LocationDto> = locations.into_iter().map(Into::into).collect();
            Json(body).into_response()
        }
        Err(e) => {
            tracing::error!("failed to list locations: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Serve the measurement series for one device, metric and time range
pub async fn get_series(
    Path(device_id): Path<String>,
    Query(query): Query<SeriesQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let interval = TimeInterval::new(query.start, query.end);
    if interval.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "start must be before end".to_string(),
            }),
        )
            .into_response();
    }

    match state
        .series_service
        .resolve(&device_id, query.metric, interval)
        .await
    {
        Ok(series) => {
            let missing = series.missing_ranges();
            let warnings = series
                .failures
                .iter()
                .map(|f| format!("range {} unavailable: {}", f.interval, f.error))
                .collect();
            let points = series.points.into_iter().map(Into::into).collect();
            Json(SeriesResponse {
                points,
                missing,
                warnings,
            })
            .into_response()
        }
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
