// Sensor location domain model
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Capture radius of the sensor, in meters.
    pub radius: i32,
    /// Whether the device is currently sending data.
    pub active: bool,
}

/// Keep active locations only.
pub fn filter_active(locations: Vec<Location>) -> Vec<Location> {
    locations.into_iter().filter(|l| l.active).collect()
}

/// Keep the first location seen per device ID.
pub fn deduplicate(locations: Vec<Location>) -> Vec<Location> {
    let mut seen = HashSet::new();
    locations
        .into_iter()
        .filter(|l| seen.insert(l.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: &str, active: bool) -> Location {
        Location {
            id: id.to_string(),
            label: format!("Sensor {id}"),
            latitude: 40.7,
            longitude: -74.0,
            radius: 30,
            active,
        }
    }

    #[test]
    fn test_filter_active() {
        let locations = vec![location("1", true), location("2", false), location("3", true)];
        let active = filter_active(locations);
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|l| l.active));
    }

    #[test]
    fn test_deduplicate_keeps_first() {
        let mut first = location("1", true);
        first.label = "first".to_string();
        let mut second = location("1", true);
        second.label = "second".to_string();

        let unique = deduplicate(vec![first, second, location("2", true)]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].label, "first");
    }
}
