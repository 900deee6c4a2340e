use serde::{Deserialize, Serialize};
use shortcuts_osrm::coordinates::{CoordinateError, LonLat};

/// A stop of a route. Coordinates are kept as the text the caller sent and
/// only parsed when a travel time is requested.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub address: String,
    pub lat: String,
    pub lon: String,
}

impl Location {
    pub fn coordinates(&self) -> Result<LonLat, CoordinateError> {
        LonLat::parse(&self.lat, &self.lon)
    }

    /// First line of the address.
    pub fn street(&self) -> &str {
        self.address.lines().next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates() {
        let location = Location {
            address: String::from("Grand Place\n1000 Brussels"),
            lat: String::from("50.8467"),
            lon: String::from("4.3525"),
        };

        assert_eq!(location.coordinates(), Ok(LonLat::new(4.3525, 50.8467)));
        assert_eq!(location.street(), "Grand Place");
    }

    #[test]
    fn test_invalid_coordinates() {
        let location = Location {
            address: String::from("Nowhere"),
            lat: String::from("north"),
            lon: String::from("4.3525"),
        };

        assert_eq!(
            location.coordinates(),
            Err(CoordinateError::Latitude(String::from("north")))
        );
    }
}
