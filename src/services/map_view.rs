use crate::config::MapConfig;
use crate::models::{MapSnapshot, SelectionState};
use crate::services::markers::MarkerGenerator;
use crate::services::region::RegionCalculator;

/// Derives what the map surface draws. Nothing here is stored; every call
/// recomputes from the state it is given.
#[derive(Debug, Clone)]
pub struct MapProjector {
    regions: RegionCalculator,
    markers: MarkerGenerator,
}

impl Default for MapProjector {
    fn default() -> Self {
        Self::new(&MapConfig::default())
    }
}

impl MapProjector {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            regions: RegionCalculator::new(config.clone()),
            markers: MarkerGenerator::from_config(config),
        }
    }

    pub fn project(&self, state: &SelectionState) -> MapSnapshot {
        let user = state.user_location.as_ref().map(|l| &l.coordinate);
        let destination = state.destination_location.as_ref().map(|l| &l.coordinate);

        MapSnapshot {
            region: self.regions.calculate(user, destination),
            markers: self.markers.generate(&state.drivers, user),
            selected_driver_id: state.selected_driver_id,
        }
    }
}
