pub mod admin;
pub mod driver;
pub mod parent;
pub mod student;

use schoolrun_routing::{
    GeoPoint, Meters, RouteOptions, Router, RoutingError, Seconds, format_distance,
    format_duration,
};
use serde::Serialize;

use crate::{error::DashboardError, records::RouteStop};

/// Total distance and duration of a route driven stop to stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePreview {
    pub distance: Meters,
    pub duration: Seconds,
    pub legs: usize,
}

impl RoutePreview {
    pub fn summary(&self) -> String {
        format!(
            "{} · {}",
            format_distance(self.distance.value()),
            format_duration(self.duration.value())
        )
    }
}

/// Remaining distance and time for a bus to reach a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Eta {
    pub distance: Meters,
    pub duration: Seconds,
    pub text: String,
}

pub(crate) fn place_point(router: &Router, place: &str) -> Result<GeoPoint, DashboardError> {
    match router.gazetteer().place(place) {
        Some(place) => Ok(place.point),
        None => Ok(router.geocode_point(place).map_err(RoutingError::from)?),
    }
}

pub(crate) fn route_preview(
    router: &Router,
    stops: &[RouteStop],
    options: &RouteOptions,
) -> Result<RoutePreview, DashboardError> {
    let points = stops
        .iter()
        .map(|stop| place_point(router, &stop.place))
        .collect::<Result<Vec<_>, _>>()?;

    let mut preview = RoutePreview {
        distance: Meters::ZERO,
        duration: Seconds::ZERO,
        legs: 0,
    };

    for pair in points.windows(2) {
        let route = router.route(&pair[0], &pair[1], options)?;
        preview.distance += route.distance();
        preview.duration += route.duration();
        preview.legs += 1;
    }

    Ok(preview)
}

pub(crate) fn eta(
    router: &Router,
    from: &GeoPoint,
    place: &str,
    options: &RouteOptions,
) -> Result<Eta, DashboardError> {
    let to = place_point(router, place)?;
    let route = router.route(from, &to, options)?;

    Ok(Eta {
        distance: route.distance(),
        duration: route.duration(),
        text: format!(
            "{} away ({})",
            format_duration(route.duration().value()),
            format_distance(route.distance().value())
        ),
    })
}
