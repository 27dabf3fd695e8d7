use crate::models::Coordinate;
use serde::{Deserialize, Serialize};

/// A candidate place returned by the geocoder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub place_id: String,
    pub display_name: String,
    #[serde(default)]
    pub display_place: String,
    #[serde(default)]
    pub display_address: String,
    pub lat: String,
    pub lon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PlaceAddress>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaceAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Prediction {
    pub fn coordinate(&self) -> Result<Coordinate, String> {
        Coordinate::parse(&self.lat, &self.lon)
    }

    /// Text the input shows once this prediction is chosen.
    pub fn input_text(&self) -> &str {
        non_empty(&self.display_place).unwrap_or(&self.display_name)
    }

    /// Bold first line of a result row.
    pub fn primary_label(&self) -> &str {
        non_empty(&self.display_place)
            .or_else(|| {
                self.address
                    .as_ref()
                    .and_then(|a| a.name.as_deref())
                    .and_then(non_empty)
            })
            .unwrap_or("Unknown")
    }

    /// Muted second line of a result row.
    pub fn secondary_label(&self) -> &str {
        non_empty(&self.display_address).unwrap_or(&self.display_name)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// What the selection callback receives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl SelectedPlace {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
