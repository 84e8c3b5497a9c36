// Location service - Use case for listing sensor locations
//
// Location metadata sits outside the interval cache: every call re-fetches
// the full list so activity flags and labels stay current.
use crate::application::errors::FetchError;
use crate::application::noise_repository::NoiseRepository;
use crate::domain::location::{deduplicate, filter_active, Location};
use crate::infrastructure::config::MapSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct LocationService {
    repository: Arc<dyn NoiseRepository>,
    settings: MapSettings,
}

impl LocationService {
    pub fn new(repository: Arc<dyn NoiseRepository>, settings: MapSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, FetchError> {
        let mut locations = self.repository.list_locations().await?;
        tracing::info!("received {} locations", locations.len());

        if self.settings.filter_active {
            locations = filter_active(locations);
            tracing::info!("filtered to {} active locations", locations.len());
        }

        if self.settings.deduplicate {
            locations = deduplicate(locations);
            tracing::info!("deduplicated to {} locations", locations.len());
        }

        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::{MeasurementPoint, Metric, TimeInterval};
    use async_trait::async_trait;

    struct FixedLocations(Vec<Location>);

    #[async_trait]
    impl NoiseRepository for FixedLocations {
        async fn list_locations(&self) -> Result<Vec<Location>, FetchError> {
            Ok(self.0.clone())
        }

        async fn fetch_measurements(
            &self,
            _device_id: &str,
            _metric: Metric,
            _interval: TimeInterval,
        ) -> Result<Vec<MeasurementPoint>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn location(id: &str, active: bool) -> Location {
        Location {
            id: id.to_string(),
            label: id.to_string(),
            latitude: 40.7,
            longitude: -74.0,
            radius: 30,
            active,
        }
    }

    #[tokio::test]
    async fn test_post_processing_follows_settings() {
        let repository = Arc::new(FixedLocations(vec![
            location("1", true),
            location("1", true),
            location("2", false),
        ]));

        let all = LocationService::new(
            repository.clone(),
            MapSettings {
                filter_active: false,
                deduplicate: false,
            },
        );
        assert_eq!(all.list_locations().await.unwrap().len(), 3);

        let trimmed = LocationService::new(
            repository,
            MapSettings {
                filter_active: true,
                deduplicate: true,
            },
        );
        let locations = trimmed.list_locations().await.unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].id, "1");
    }
}
