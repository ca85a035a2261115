use geo::{Bearing, Distance, Haversine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::meters::Meters;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the WGS84 lat/lng bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> Meters {
        let haversine = Haversine;
        Meters::new(haversine.distance(geo::Point::from(self), geo::Point::from(other)))
    }

    /// Initial great-circle bearing towards `dest`, in degrees within `0..360`.
    pub fn bearing(&self, dest: &GeoPoint) -> f64 {
        let haversine = Haversine;
        haversine
            .bearing(geo::Point::from(self), geo::Point::from(dest))
            .rem_euclid(360.0)
    }

    pub fn offset(&self, d_lat: f64, d_lng: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }

    /// GeoJSON ordering.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<&GeoPoint> for geo::Point<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo::Point::new(point.lng, point.lat)
    }
}

impl From<&GeoPoint> for geo::Coord<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo::Coord {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(lng_lat: [f64; 2]) -> Self {
        GeoPoint {
            lat: lng_lat[1],
            lng: lng_lat[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        let london_bridge = GeoPoint::new(51.5079, -0.0877);
        let tower_bridge = GeoPoint::new(51.5055, -0.0754);

        let distance = london_bridge.haversine_distance(&tower_bridge).value();
        assert!((distance - 890.0).abs() < 30.0, "got {distance}");
        assert_eq!(london_bridge.haversine_distance(&london_bridge).value(), 0.0);
    }

    #[test]
    fn test_bearing_is_normalized() {
        let origin = GeoPoint::new(51.5, 0.0);

        let east = origin.bearing(&GeoPoint::new(51.5, 0.1));
        assert!((east - 90.0).abs() < 1.0);

        let west = origin.bearing(&GeoPoint::new(51.5, -0.1));
        assert!((west - 270.0).abs() < 1.0);

        let north = origin.bearing(&GeoPoint::new(51.6, 0.0));
        assert!(north < 1.0 || north > 359.0);
    }

    #[test]
    fn test_is_valid() {
        assert!(GeoPoint::new(51.5, -0.1).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_lng_lat_order() {
        let point = GeoPoint::new(51.5079, -0.0877);
        assert_eq!(point.lng_lat(), [-0.0877, 51.5079]);
        assert_eq!(GeoPoint::from(point.lng_lat()), point);
    }
}
