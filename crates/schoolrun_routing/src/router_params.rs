use crate::{geocode::FallbackPolicy, geopoint::GeoPoint, meters::Meters};

/// Charing Cross, the conventional centre of London.
pub const DEFAULT_LOCATION: GeoPoint = GeoPoint::new(51.5074, -0.1278);

#[derive(Clone, Debug)]
pub struct RouterParams {
    /// Endpoints closer than this to a known place are treated as that place.
    pub near_place_radius: Meters,

    /// Fuzzy matches must score strictly above this.
    pub match_threshold: f64,
    pub default_location: GeoPoint,
    /// Max offset in degrees applied per axis to the default location.
    pub fallback_jitter: f64,
    pub fallback_policy: FallbackPolicy,

    /// Max offset in degrees applied per axis to generated interior waypoints.
    pub waypoint_jitter: f64,
    pub leg_length: Meters,
    pub min_legs: usize,
    pub max_legs: usize,

    /// Seeds the router's random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for RouterParams {
    fn default() -> Self {
        Self {
            near_place_radius: Meters::new(500.0),
            match_threshold: 0.3,
            default_location: DEFAULT_LOCATION,
            fallback_jitter: 0.005,
            fallback_policy: FallbackPolicy::Jittered,
            waypoint_jitter: 0.0005,
            leg_length: Meters::new(500.0),
            min_legs: 4,
            max_legs: 20,
            seed: None,
        }
    }
}
