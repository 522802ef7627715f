use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCenter {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub working_hours: String,
    pub working_days: String,
    pub services: Vec<String>,
    pub rating: Decimal,
    /// Map position, when known.
    pub coordinates: Option<Coordinates>,
}

impl ServiceCenter {
    /// Directions link for the center, when its position is known.
    pub fn directions_url(&self) -> Option<String> {
        self.coordinates.as_ref().map(Coordinates::maps_url)
    }
}

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: Decimal,
    pub lng: Decimal,
}

impl Coordinates {
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn maps_url_keeps_coordinate_precision() {
        let coordinates = Coordinates {
            lat: dec!(28.5355),
            lng: dec!(77.2410),
        };

        assert_eq!(
            coordinates.maps_url(),
            "https://www.google.com/maps?q=28.5355,77.2410"
        );
    }
}
