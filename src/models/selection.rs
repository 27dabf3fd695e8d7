use crate::models::{Driver, Location, Marker, Region};
use serde::{Deserialize, Serialize};

/// Everything the session knows about the current trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelectionState {
    pub user_location: Option<Location>,
    pub destination_location: Option<Location>,
    pub drivers: Vec<Driver>,
    pub selected_driver_id: Option<i64>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        *self == SelectionState::default()
    }

    pub fn selected_driver(&self) -> Option<&Driver> {
        let id = self.selected_driver_id?;
        self.drivers.iter().find(|d| d.driver_id == id)
    }
}

/// Which input field a search belongs to, and so which location it sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// "From": writes the user location.
    Origin,
    /// "To": writes the destination.
    Destination,
}

/// What the map surface renders, derived from a [`SelectionState`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapSnapshot {
    pub region: Region,
    pub markers: Vec<Marker>,
    pub selected_driver_id: Option<i64>,
}
