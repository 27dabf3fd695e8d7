use crate::config::MapConfig;
use crate::models::{Coordinate, Region};
use geo::{BoundingRect, MultiPoint, Point};

/// Derives the map viewport from the user and destination coordinates.
///
/// The two-point box is computed in plain longitude space, so a trip that
/// crosses the antimeridian gets a viewport spanning the whole globe the
/// long way round. That case is not handled.
#[derive(Debug, Clone)]
pub struct RegionCalculator {
    config: MapConfig,
}

impl RegionCalculator {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, user: Option<&Coordinate>, destination: Option<&Coordinate>) -> Region {
        match (user, destination) {
            (None, None) => self.default_region(),
            (Some(point), None) | (None, Some(point)) => self.single_point(point),
            (Some(user), Some(destination)) => self.enclosing(user, destination),
        }
    }

    /// The fallback city center at the default zoom.
    pub fn default_region(&self) -> Region {
        Region {
            latitude: self.config.default_latitude,
            longitude: self.config.default_longitude,
            latitude_delta: self.config.default_delta,
            longitude_delta: self.config.default_delta,
        }
    }

    fn single_point(&self, point: &Coordinate) -> Region {
        let delta = self.config.default_delta.max(self.config.min_delta);
        Region::centered_on(point, delta, delta)
    }

    fn enclosing(&self, a: &Coordinate, b: &Coordinate) -> Region {
        // geo uses x = longitude, y = latitude
        let points = MultiPoint::new(vec![
            Point::new(a.longitude, a.latitude),
            Point::new(b.longitude, b.latitude),
        ]);
        let Some(rect) = points.bounding_rect() else {
            return self.single_point(a);
        };

        let center = rect.center();
        let latitude_delta = (rect.height() * self.config.padding_factor).max(self.config.min_delta);
        let longitude_delta = (rect.width() * self.config.padding_factor).max(self.config.min_delta);

        tracing::debug!(
            lat_span = rect.height(),
            lng_span = rect.width(),
            "Region over two points: center ({:.4}, {:.4}), deltas {:.4}/{:.4}",
            center.y, center.x, latitude_delta, longitude_delta
        );

        Region {
            latitude: center.y,
            longitude: center.x,
            latitude_delta,
            longitude_delta,
        }
    }
}

impl Default for RegionCalculator {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}
