use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::travel_profile::TravelProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoutePreference {
    Fastest,
    Shortest,
    #[default]
    Recommended,
}

impl RoutePreference {
    pub fn distance_factor(&self) -> f64 {
        match self {
            RoutePreference::Fastest => 1.1,
            RoutePreference::Shortest => 0.9,
            RoutePreference::Recommended => 1.0,
        }
    }

    pub fn duration_factor(&self) -> f64 {
        match self {
            RoutePreference::Fastest => 0.9,
            RoutePreference::Shortest => 1.1,
            RoutePreference::Recommended => 1.0,
        }
    }
}

impl Display for RoutePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RoutePreference::Fastest => "fastest",
                RoutePreference::Shortest => "shortest",
                RoutePreference::Recommended => "recommended",
            }
        )
    }
}

impl FromStr for RoutePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fastest" => Ok(RoutePreference::Fastest),
            "shortest" => Ok(RoutePreference::Shortest),
            "recommended" => Ok(RoutePreference::Recommended),
            other => Err(format!("Unknown route preference \"{}\"", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize, JsonSchema)]
pub struct RouteOptions {
    #[serde(default)]
    pub preference: RoutePreference,
    #[serde(default)]
    pub profile: TravelProfile,
}

impl RouteOptions {
    pub fn with_preference(preference: RoutePreference) -> Self {
        Self {
            preference,
            ..Self::default()
        }
    }
}
