use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("Geocoding query is empty")]
    InvalidQuery,

    #[error("No known location matches \"{0}\"")]
    NoMatch(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Invalid coordinate (lat {lat}, lng {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Route geometry has no coordinates")]
    EmptyGeometry,

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

impl RoutingError {
    pub fn code(&self) -> &'static str {
        match self {
            RoutingError::InvalidCoordinate { .. } => "invalid_coordinate",
            RoutingError::EmptyGeometry => "empty_geometry",
            RoutingError::Geocode(GeocodeError::InvalidQuery) => "invalid_query",
            RoutingError::Geocode(GeocodeError::NoMatch(_)) => "no_match",
        }
    }
}

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("Failed to read gazetteer file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse gazetteer: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gazetteer place has an empty name or alias")]
    EmptyKey,

    #[error("Duplicate gazetteer key \"{0}\"")]
    DuplicateKey(String),

    #[error("Gazetteer place \"{name}\" has an invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { name: String, lat: f64, lng: f64 },
}

/// Serializable `{ error, message }` shape handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&RoutingError> for ErrorResponse {
    fn from(error: &RoutingError) -> Self {
        ErrorResponse {
            error: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<RoutingError> for ErrorResponse {
    fn from(error: RoutingError) -> Self {
        ErrorResponse::from(&error)
    }
}
