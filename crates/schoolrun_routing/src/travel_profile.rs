use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kmh::Kmh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TravelProfile {
    #[default]
    DrivingCar,
    FootWalking,
    CyclingRegular,
}

impl TravelProfile {
    pub const ALL: [TravelProfile; 3] = [
        TravelProfile::DrivingCar,
        TravelProfile::FootWalking,
        TravelProfile::CyclingRegular,
    ];

    /// Ratio of road distance to straight-line distance.
    pub fn route_factor(&self) -> f64 {
        match self {
            TravelProfile::DrivingCar => 1.3,
            TravelProfile::FootWalking => 1.2,
            TravelProfile::CyclingRegular => 1.25,
        }
    }

    pub fn average_speed(&self) -> Kmh {
        match self {
            TravelProfile::DrivingCar => Kmh::new(30.0),
            TravelProfile::FootWalking => Kmh::new(5.0),
            TravelProfile::CyclingRegular => Kmh::new(15.0),
        }
    }
}

impl Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelProfile::DrivingCar => "driving-car",
                TravelProfile::FootWalking => "foot-walking",
                TravelProfile::CyclingRegular => "cycling-regular",
            }
        )
    }
}

impl FromStr for TravelProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving-car" | "car" | "drive" => Ok(TravelProfile::DrivingCar),
            "foot-walking" | "walk" | "foot" => Ok(TravelProfile::FootWalking),
            "cycling-regular" | "cycle" | "bike" => Ok(TravelProfile::CyclingRegular),
            other => Err(format!("Unknown travel profile \"{}\"", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_display() {
        for profile in TravelProfile::ALL {
            assert_eq!(profile.to_string().parse::<TravelProfile>(), Ok(profile));
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&TravelProfile::CyclingRegular).unwrap(),
            "\"cycling-regular\""
        );
    }
}
