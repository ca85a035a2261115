use crate::route_result::Maneuver;

const STREET_NAMES: &[&str] = &[
    "High Street",
    "Station Road",
    "Church Road",
    "Park Road",
    "London Road",
    "Victoria Road",
    "Green Lane",
    "Manor Road",
    "Queens Road",
    "Mill Lane",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Compass {
    const RING: [Compass; 8] = [
        Compass::North,
        Compass::NorthEast,
        Compass::East,
        Compass::SouthEast,
        Compass::South,
        Compass::SouthWest,
        Compass::West,
        Compass::NorthWest,
    ];

    /// Buckets a bearing in degrees into one of the 8 sectors of 45° each.
    pub fn from_bearing(bearing: f64) -> Compass {
        let index = (bearing.rem_euclid(360.0) / 45.0).round() as usize % 8;
        Compass::RING[index]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Compass::North => "north",
            Compass::NorthEast => "northeast",
            Compass::East => "east",
            Compass::SouthEast => "southeast",
            Compass::South => "south",
            Compass::SouthWest => "southwest",
            Compass::West => "west",
            Compass::NorthWest => "northwest",
        }
    }
}

/// Classifies the change of heading between two consecutive legs.
pub fn turn_between(previous: Compass, current: Compass) -> Maneuver {
    let clockwise = (current.index() + 8 - previous.index()) % 8;
    let circular = clockwise.min(8 - clockwise);

    match circular {
        0 => Maneuver::Straight,
        4 => Maneuver::UTurn,
        _ if clockwise < 4 => Maneuver::TurnRight,
        _ => Maneuver::TurnLeft,
    }
}

pub fn street_name(leg_index: usize) -> &'static str {
    STREET_NAMES[leg_index % STREET_NAMES.len()]
}

pub fn instruction_text(maneuver: Maneuver, heading: Compass, street: &str) -> String {
    match maneuver {
        Maneuver::Depart => format!("Head {} on {}", heading.name(), street),
        Maneuver::Straight => format!("Continue {} on {}", heading.name(), street),
        Maneuver::TurnLeft => format!("Turn left onto {}", street),
        Maneuver::TurnRight => format!("Turn right onto {}", street),
        Maneuver::KeepLeft => format!("Keep left onto {}", street),
        Maneuver::KeepRight => format!("Keep right onto {}", street),
        Maneuver::TakeExit => format!("Take the exit onto {}", street),
        Maneuver::UTurn => format!("Make a U-turn onto {}", street),
        Maneuver::Arrive => format!("Arrive at {}", street),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bearing() {
        assert_eq!(Compass::from_bearing(0.0), Compass::North);
        assert_eq!(Compass::from_bearing(22.4), Compass::North);
        assert_eq!(Compass::from_bearing(22.6), Compass::NorthEast);
        assert_eq!(Compass::from_bearing(180.0), Compass::South);
        assert_eq!(Compass::from_bearing(350.0), Compass::North);
        assert_eq!(Compass::from_bearing(-90.0), Compass::West);
    }

    #[test]
    fn test_turn_between() {
        assert_eq!(
            turn_between(Compass::North, Compass::North),
            Maneuver::Straight
        );
        assert_eq!(
            turn_between(Compass::North, Compass::East),
            Maneuver::TurnRight
        );
        assert_eq!(
            turn_between(Compass::North, Compass::NorthWest),
            Maneuver::TurnLeft
        );
        assert_eq!(turn_between(Compass::East, Compass::West), Maneuver::UTurn);
        // wraps around the ring
        assert_eq!(
            turn_between(Compass::NorthWest, Compass::NorthEast),
            Maneuver::TurnRight
        );
        assert_eq!(
            turn_between(Compass::NorthEast, Compass::NorthWest),
            Maneuver::TurnLeft
        );
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(
            instruction_text(Maneuver::Depart, Compass::SouthEast, street_name(0)),
            "Head southeast on High Street"
        );
        assert_eq!(street_name(10), "High Street");
    }
}
