use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub driver_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub profile_image_url: String,
    pub car_image_url: String,
    pub car_seats: u32,
    pub rating: f64,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.car_seats == 0 {
            return Err(format!(
                "Driver {} must have at least one seat",
                self.driver_id
            ));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!(
                "Driver {} rating {} must be between 0 and 5",
                self.driver_id, self.rating
            ));
        }
        Ok(())
    }
}

/// A driver placed on the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    /// Unique within one generated batch, starting at 1.
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub title: String,
    #[serde(flatten)]
    pub driver: Driver,
}
