use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ErrorResponse, RoutingError},
    geopoint::GeoPoint,
    meters::Meters,
    route_options::RoutePreference,
    seconds::Seconds,
    travel_profile::TravelProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Maneuver {
    Depart,
    Straight,
    TurnLeft,
    TurnRight,
    KeepLeft,
    KeepRight,
    TakeExit,
    UTurn,
    Arrive,
}

impl Maneuver {
    /// Turn codes as used by OpenRouteService step types.
    pub fn code(&self) -> u8 {
        match self {
            Maneuver::TurnLeft => 0,
            Maneuver::TurnRight => 1,
            Maneuver::Straight => 6,
            Maneuver::TakeExit => 8,
            Maneuver::UTurn => 9,
            Maneuver::Arrive => 10,
            Maneuver::Depart => 11,
            Maneuver::KeepLeft => 12,
            Maneuver::KeepRight => 13,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    pub distance: Meters,
    pub duration: Seconds,
    pub instruction: String,
    /// Street name
    pub name: String,
    #[serde(rename = "type")]
    pub maneuver: Maneuver,
    /// Inclusive coordinate index range covered by this segment.
    pub way_points: [usize; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteSummary {
    pub distance: Meters,
    pub duration: Seconds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteSource {
    Predefined { from: String, to: String },
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteProperties {
    pub segments: Vec<Segment>,
    pub summary: RouteSummary,
    pub way_points: [usize; 2],
    pub source: RouteSource,
    pub profile: TravelProfile,
    pub preference: RoutePreference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteGeometry {
    /// `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RouteResult {
    pub geometry: RouteGeometry,
    pub properties: RouteProperties,
}

impl RouteResult {
    pub fn distance(&self) -> Meters {
        self.properties.summary.distance
    }

    pub fn duration(&self) -> Seconds {
        self.properties.summary.duration
    }

    pub fn segments(&self) -> &[Segment] {
        &self.properties.segments
    }

    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.geometry
            .coordinates
            .iter()
            .map(|&lng_lat| GeoPoint::from(lng_lat))
    }

    pub fn is_predefined(&self) -> bool {
        matches!(self.properties.source, RouteSource::Predefined { .. })
    }

    pub fn to_geojson_feature(&self) -> geojson::Feature {
        let line: geo_types::LineString<f64> = self
            .geometry
            .coordinates
            .iter()
            .map(|c| geo_types::Coord { x: c[0], y: c[1] })
            .collect();

        let mut properties = geojson::JsonObject::new();
        properties.insert(
            "distance".to_string(),
            serde_json::json!(self.distance().value()),
        );
        properties.insert(
            "duration".to_string(),
            serde_json::json!(self.duration().value()),
        );
        properties.insert(
            "profile".to_string(),
            serde_json::json!(self.properties.profile.to_string()),
        );
        properties.insert(
            "preference".to_string(),
            serde_json::json!(self.properties.preference.to_string()),
        );
        properties.insert(
            "steps".to_string(),
            self.segments()
                .iter()
                .map(|segment| {
                    serde_json::json!({
                        "type": segment.maneuver.code(),
                        "instruction": segment.instruction,
                        "name": segment.name,
                        "way_points": segment.way_points,
                    })
                })
                .collect(),
        );

        geojson::Feature {
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&line))),
            properties: Some(properties),
            ..Default::default()
        }
    }
}

/// Either a route or the `{ error, message }` object, as handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum RouteResponse {
    Route(RouteResult),
    Error(ErrorResponse),
}

impl From<Result<RouteResult, RoutingError>> for RouteResponse {
    fn from(result: Result<RouteResult, RoutingError>) -> Self {
        match result {
            Ok(route) => RouteResponse::Route(route),
            Err(error) => RouteResponse::Error(ErrorResponse::from(&error)),
        }
    }
}
