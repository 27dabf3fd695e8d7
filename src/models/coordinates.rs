use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        let coordinate = Coordinate {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Parse the string pair geocoders return (`"12.97"`, `"77.59"`).
    pub fn parse(lat: &str, lon: &str) -> Result<Self, String> {
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("Invalid latitude: '{}'", lat))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("Invalid longitude: '{}'", lon))?;
        Coordinate::new(latitude, longitude)
    }

    /// Range check for values that arrived through deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                self.longitude
            ));
        }
        Ok(())
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Shift by a degree offset, clamping latitude and wrapping longitude so
    /// the result stays a valid coordinate.
    pub fn offset_by(&self, d_lat: f64, d_lng: f64) -> Self {
        let latitude = (self.latitude + d_lat).clamp(-90.0, 90.0);
        let mut longitude = self.longitude + d_lng;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// A coordinate plus the human-readable address it was picked from, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(coordinate: Coordinate, address: Option<String>) -> Self {
        Location {
            coordinate,
            address,
        }
    }
}

impl From<Coordinate> for Location {
    fn from(coordinate: Coordinate) -> Self {
        Location::new(coordinate, None)
    }
}
