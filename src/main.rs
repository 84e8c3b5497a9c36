// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::application::interval_cache::IntervalCache;
use crate::application::location_service::LocationService;
use crate::application::series_service::SeriesService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::noise_api::NoiseApiClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_series, health_check, list_locations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config()?;

    // Remote client (infrastructure layer), shared by both services.
    let repository = Arc::new(NoiseApiClient::new(
        config.api.base_url,
        config.api.token,
        config.api.page_size,
    ));

    // One interval cache per process: coverage lives for the session and
    // is rebuilt on restart.
    let cache = Arc::new(IntervalCache::new());

    let state = Arc::new(AppState {
        location_service: LocationService::new(repository.clone(), config.map),
        series_service: SeriesService::new(repository, cache),
    });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/locations", get(list_locations))
        .route("/locations/:id/series", get(get_series))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("starting noise-telemetry service on {addr}");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
