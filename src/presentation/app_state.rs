// Application state for HTTP handlers
use crate::application::location_service::LocationService;
use crate::application::series_service::SeriesService;

#[derive(Clone)]
pub struct AppState {
    pub location_service: LocationService,
    pub series_service: SeriesService,
}
