use crate::{geopoint::GeoPoint, meters::Meters};

pub fn compute_geometry_distance(geometry: &[GeoPoint]) -> Meters {
    geometry
        .windows(2)
        .map(|pair| pair[0].haversine_distance(&pair[1]))
        .sum()
}

pub fn lerp(from: &GeoPoint, to: &GeoPoint, t: f64) -> GeoPoint {
    GeoPoint {
        lat: from.lat + (to.lat - from.lat) * t,
        lng: from.lng + (to.lng - from.lng) * t,
    }
}
