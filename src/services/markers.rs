use crate::config::MapConfig;
use crate::models::{Coordinate, Driver, Marker};
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};

/// Places drivers on the map around the user's position.
///
/// There is no live driver feed, so each driver is drawn at a fixed offset
/// from the user derived from its `driver_id` alone. The same roster and the
/// same user coordinate always produce the same markers, so re-renders do not
/// make markers jump around.
#[derive(Debug, Clone)]
pub struct MarkerGenerator {
    /// `None` when the bound is not a finite number; markers then sit on the user.
    offsets: Option<Uniform<f64>>,
}

impl MarkerGenerator {
    pub fn new(max_offset_deg: f64) -> Self {
        let max = max_offset_deg.abs();
        let offsets = Uniform::new_inclusive(-max, max).ok();
        if offsets.is_none() {
            tracing::warn!("Invalid marker offset bound {}, markers will not be spread", max_offset_deg);
        }
        Self { offsets }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.marker_max_offset_deg)
    }

    /// One marker per driver, in roster order, ids numbered from 1. Empty when
    /// the user's position is unknown.
    pub fn generate(&self, drivers: &[Driver], user: Option<&Coordinate>) -> Vec<Marker> {
        let Some(user) = user else {
            return Vec::new();
        };

        drivers
            .iter()
            .enumerate()
            .map(|(index, driver)| {
                let (d_lat, d_lng) = self.offset_for(driver.driver_id);
                let position = user.offset_by(d_lat, d_lng);
                Marker {
                    id: index as u32 + 1,
                    latitude: position.latitude,
                    longitude: position.longitude,
                    title: driver.full_name(),
                    driver: driver.clone(),
                }
            })
            .collect()
    }

    /// Per-axis degree offset in `[-max, max]`, drawn from an RNG seeded with
    /// the driver id.
    fn offset_for(&self, driver_id: i64) -> (f64, f64) {
        let Some(offsets) = &self.offsets else {
            return (0.0, 0.0);
        };
        let mut rng = StdRng::seed_from_u64(driver_id as u64);
        (offsets.sample(&mut rng), offsets.sample(&mut rng))
    }
}

impl Default for MarkerGenerator {
    fn default() -> Self {
        Self::from_config(&MapConfig::default())
    }
}
