pub mod error;
pub mod format;
pub mod gazetteer;
pub mod geocode;
mod geometry;
pub mod geopoint;
mod instructions;
pub mod kmh;
pub mod meters;
pub mod predefined;
pub mod route_options;
pub mod route_result;
pub mod router;
pub mod router_params;
pub mod seconds;
pub mod stopwatch;
pub mod synthesize;
pub mod travel_profile;

pub use error::{ErrorResponse, GazetteerError, GeocodeError, RoutingError};
pub use format::{format_distance, format_duration};
pub use gazetteer::{Gazetteer, Place};
pub use geocode::{FallbackPolicy, GeocodeMatch, Geocoded};
pub use geopoint::GeoPoint;
pub use meters::Meters;
pub use route_options::{RouteOptions, RoutePreference};
pub use route_result::{RouteResponse, RouteResult, Segment};
pub use router::Router;
pub use router_params::{DEFAULT_LOCATION, RouterParams};
pub use seconds::Seconds;
pub use travel_profile::TravelProfile;
