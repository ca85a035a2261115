use std::sync::Arc;

use parking_lot::Mutex;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::debug;

use crate::{
    error::{GeocodeError, RoutingError},
    gazetteer::Gazetteer,
    geocode::{Geocoded, geocode},
    geopoint::GeoPoint,
    predefined::{Direction, PredefinedRoute},
    route_options::RouteOptions,
    route_result::RouteResult,
    router_params::RouterParams,
    stopwatch::Stopwatch,
    synthesize::generate_route,
};

/// Entry point of the mock routing engine.
///
/// The gazetteer and predefined routes are read-only; the only mutable state
/// is the random source used for jitter.
pub struct Router {
    gazetteer: Arc<Gazetteer>,
    params: RouterParams,
    rng: Mutex<SmallRng>,
}

impl Default for Router {
    fn default() -> Self {
        Router::new(RouterParams::default())
    }
}

impl Router {
    pub fn new(params: RouterParams) -> Self {
        Router::with_gazetteer(Arc::new(Gazetteer::builtin().clone()), params)
    }

    pub fn with_gazetteer(gazetteer: Arc<Gazetteer>, params: RouterParams) -> Self {
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        Self {
            gazetteer,
            params,
            rng: Mutex::new(rng),
        }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    pub fn params(&self) -> &RouterParams {
        &self.params
    }

    pub fn geocode(&self, query: &str) -> Result<Geocoded, GeocodeError> {
        let mut rng = self.rng.lock();
        geocode(&self.gazetteer, query, &self.params, &mut *rng)
    }

    pub fn geocode_point(&self, query: &str) -> Result<GeoPoint, GeocodeError> {
        self.geocode(query).map(|geocoded| geocoded.point)
    }

    pub fn route(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
        options: &RouteOptions,
    ) -> Result<RouteResult, RoutingError> {
        for point in [start, end] {
            if !point.is_valid() {
                return Err(RoutingError::InvalidCoordinate {
                    lat: point.lat,
                    lng: point.lng,
                });
            }
        }

        let stopwatch = Stopwatch::new("route");

        if let Some((route, direction)) = self.find_predefined(start, end) {
            debug!(
                "Using predefined route {} -> {} ({:?})",
                route.from, route.to, direction
            );
            let result = route.build(direction, options);
            stopwatch.report();
            return Ok(result);
        }

        let result = {
            let mut rng = self.rng.lock();
            generate_route(start, end, options, &self.params, &mut *rng)
        };
        stopwatch.report();

        result
    }

    /// Geocodes both texts, then routes between the results.
    pub fn directions(
        &self,
        from: &str,
        to: &str,
        options: &RouteOptions,
    ) -> Result<RouteResult, RoutingError> {
        let start = self.geocode_point(from)?;
        let end = self.geocode_point(to)?;
        self.route(&start, &end, options)
    }

    fn find_predefined(
        &self,
        start: &GeoPoint,
        end: &GeoPoint,
    ) -> Option<(&'static PredefinedRoute, Direction)> {
        let radius = self.params.near_place_radius;
        let from = self.gazetteer.nearest_place(start, radius)?;
        let to = self.gazetteer.nearest_place(end, radius)?;

        PredefinedRoute::find(&from.name, &to.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate() {
        let router = Router::default();
        let result = router.route(
            &GeoPoint::new(120.0, 0.0),
            &GeoPoint::new(51.5, 0.0),
            &RouteOptions::default(),
        );

        assert_eq!(
            result,
            Err(RoutingError::InvalidCoordinate {
                lat: 120.0,
                lng: 0.0
            })
        );
    }

    #[test]
    fn test_seeded_router_is_reproducible() {
        let params = RouterParams {
            seed: Some(11),
            ..RouterParams::default()
        };
        let start = GeoPoint::new(51.60, -0.20);
        let end = GeoPoint::new(51.45, 0.05);

        let first = Router::new(params.clone())
            .route(&start, &end, &RouteOptions::default())
            .unwrap();
        let second = Router::new(params)
            .route(&start, &end, &RouteOptions::default())
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_directions_rejects_empty_query() {
        let router = Router::default();
        let result = router.directions("", "london bridge", &RouteOptions::default());
        assert_eq!(
            result,
            Err(RoutingError::Geocode(GeocodeError::InvalidQuery))
        );
    }
}
