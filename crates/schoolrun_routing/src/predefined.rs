use crate::{
    meters::Meters,
    route_options::RouteOptions,
    route_result::{
        Maneuver, RouteGeometry, RouteProperties, RouteResult, RouteSource, RouteSummary,
        Segment,
    },
    seconds::Seconds,
    travel_profile::TravelProfile,
};

struct AuthoredStep {
    instruction: &'static str,
    name: &'static str,
    maneuver: Maneuver,
    distance: f64,
}

const fn step(
    instruction: &'static str,
    name: &'static str,
    maneuver: Maneuver,
    distance: f64,
) -> AuthoredStep {
    AuthoredStep {
        instruction,
        name,
        maneuver,
        distance,
    }
}

/// A hand-authored route between two gazetteer places.
///
/// Waypoints are stored in the `from -> to` direction. Each direction carries
/// its own instructions, one step per pair of consecutive waypoints, and the
/// step distances add up to `distance`.
pub struct PredefinedRoute {
    pub from: &'static str,
    pub to: &'static str,
    distance: f64,
    car_duration: f64,
    walk_duration: f64,
    cycle_duration: f64,
    /// (lat, lng)
    waypoints: &'static [(f64, f64)],
    forward: &'static [AuthoredStep],
    backward: &'static [AuthoredStep],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

const PREDEFINED_ROUTES: &[PredefinedRoute] = &[
    PredefinedRoute {
        from: "rm10 9qb",
        to: "uel docklands campus",
        distance: 11200.0,
        car_duration: 1080.0,
        walk_duration: 8400.0,
        cycle_duration: 2700.0,
        waypoints: &[
            (51.5450, 0.1640),
            (51.5398, 0.1612),
            (51.5352, 0.1365),
            (51.5296, 0.1080),
            (51.5232, 0.0852),
            (51.5168, 0.0716),
            (51.5110, 0.0712),
            (51.5077, 0.0650),
        ],
        forward: &[
            step("Head south on Rainham Road South", "Rainham Road South", Maneuver::Depart, 800.0),
            step("Turn right onto Ripple Road (A1306)", "Ripple Road", Maneuver::TurnRight, 2100.0),
            step("Continue onto Alfred's Way (A13)", "Alfred's Way", Maneuver::Straight, 2200.0),
            step("Keep left to stay on Newham Way (A13)", "Newham Way", Maneuver::KeepLeft, 2600.0),
            step("Take the exit towards Beckton onto Royal Docks Road", "Royal Docks Road", Maneuver::TakeExit, 1200.0),
            step("Turn right onto Royal Albert Way", "Royal Albert Way", Maneuver::TurnRight, 1000.0),
            step("Turn left onto University Way, the campus is on the right", "University Way", Maneuver::TurnLeft, 1300.0),
        ],
        backward: &[
            step("Head north on University Way", "University Way", Maneuver::Depart, 1300.0),
            step("Turn right onto Royal Albert Way", "Royal Albert Way", Maneuver::TurnRight, 1000.0),
            step("Turn left onto Royal Docks Road", "Royal Docks Road", Maneuver::TurnLeft, 1200.0),
            step("Keep right to join Newham Way (A13) towards Dagenham", "Newham Way", Maneuver::KeepRight, 2600.0),
            step("Continue onto Alfred's Way (A13)", "Alfred's Way", Maneuver::Straight, 2200.0),
            step("Take the exit onto Ripple Road (A1306)", "Ripple Road", Maneuver::TakeExit, 2100.0),
            step("Turn left onto Rainham Road South, the destination is on the left", "Rainham Road South", Maneuver::TurnLeft, 800.0),
        ],
    },
    PredefinedRoute {
        from: "uel stratford campus",
        to: "uel docklands campus",
        distance: 7600.0,
        car_duration: 1320.0,
        walk_duration: 5700.0,
        cycle_duration: 1920.0,
        waypoints: &[
            (51.5383, 0.0045),
            (51.5362, 0.0105),
            (51.5298, 0.0168),
            (51.5186, 0.0289),
            (51.5119, 0.0512),
            (51.5077, 0.0650),
        ],
        forward: &[
            step("Head southeast on Water Lane", "Water Lane", Maneuver::Depart, 700.0),
            step("Turn right onto Abbey Road", "Abbey Road", Maneuver::TurnRight, 1100.0),
            step("Continue onto Manor Road", "Manor Road", Maneuver::Straight, 1600.0),
            step("Turn left onto Newham Way (A13)", "Newham Way", Maneuver::TurnLeft, 2300.0),
            step("Keep right onto Royal Albert Way, the campus is ahead", "Royal Albert Way", Maneuver::KeepRight, 1900.0),
        ],
        backward: &[
            step("Head west on Royal Albert Way", "Royal Albert Way", Maneuver::Depart, 1900.0),
            step("Keep left onto Newham Way (A13)", "Newham Way", Maneuver::KeepLeft, 2300.0),
            step("Turn right onto Manor Road", "Manor Road", Maneuver::TurnRight, 1600.0),
            step("Continue onto Abbey Road", "Abbey Road", Maneuver::Straight, 1100.0),
            step("Turn left onto Water Lane, the campus is on the right", "Water Lane", Maneuver::TurnLeft, 700.0),
        ],
    },
    PredefinedRoute {
        from: "london bridge",
        to: "canary wharf",
        distance: 5900.0,
        car_duration: 1260.0,
        walk_duration: 4500.0,
        cycle_duration: 1380.0,
        waypoints: &[
            (51.5079, -0.0877),
            (51.5048, -0.0785),
            (51.5094, -0.0742),
            (51.5103, -0.0520),
            (51.5054, -0.0235),
        ],
        forward: &[
            step("Head east on Tooley Street", "Tooley Street", Maneuver::Depart, 900.0),
            step("Turn left onto Tower Bridge Road", "Tower Bridge Road", Maneuver::TurnLeft, 800.0),
            step("Turn right onto The Highway (A1203)", "The Highway", Maneuver::TurnRight, 2200.0),
            step("Continue onto Limehouse Link, arrive at Westferry Circus", "Limehouse Link", Maneuver::Straight, 2000.0),
        ],
        backward: &[
            step("Head west on Limehouse Link", "Limehouse Link", Maneuver::Depart, 2000.0),
            step("Continue onto The Highway (A1203)", "The Highway", Maneuver::Straight, 2200.0),
            step("Turn left onto Tower Bridge Road", "Tower Bridge Road", Maneuver::TurnLeft, 800.0),
            step("Turn right onto Tooley Street, the station is on the left", "Tooley Street", Maneuver::TurnRight, 900.0),
        ],
    },
];

impl PredefinedRoute {
    pub fn all() -> &'static [PredefinedRoute] {
        PREDEFINED_ROUTES
    }

    /// Looks up a route between two place names, in either direction.
    pub fn find(from: &str, to: &str) -> Option<(&'static PredefinedRoute, Direction)> {
        PREDEFINED_ROUTES.iter().find_map(|route| {
            if route.from == from && route.to == to {
                Some((route, Direction::Forward))
            } else if route.from == to && route.to == from {
                Some((route, Direction::Backward))
            } else {
                None
            }
        })
    }

    pub fn distance(&self) -> Meters {
        Meters::new(self.distance)
    }

    pub fn duration(&self, profile: TravelProfile) -> Seconds {
        Seconds::new(match profile {
            TravelProfile::DrivingCar => self.car_duration,
            TravelProfile::FootWalking => self.walk_duration,
            TravelProfile::CyclingRegular => self.cycle_duration,
        })
    }

    fn steps(&self, direction: Direction) -> &'static [AuthoredStep] {
        match direction {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
        }
    }

    /// Builds the route result. Deterministic: the same inputs always give the same output.
    pub fn build(&self, direction: Direction, options: &RouteOptions) -> RouteResult {
        let preference = options.preference;
        let distance = self.distance() * preference.distance_factor();
        let duration = self.duration(options.profile) * preference.duration_factor();

        let mut coordinates: Vec<[f64; 2]> = self
            .waypoints
            .iter()
            .map(|&(lat, lng)| [lng, lat])
            .collect();
        if direction == Direction::Backward {
            coordinates.reverse();
        }

        let segments: Vec<Segment> = self
            .steps(direction)
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let share = step.distance / self.distance;
                Segment {
                    distance: Meters::new(step.distance) * preference.distance_factor(),
                    duration: duration * share,
                    instruction: step.instruction.to_string(),
                    name: step.name.to_string(),
                    maneuver: step.maneuver,
                    way_points: [index, index + 1],
                }
            })
            .collect();

        let (from, to) = match direction {
            Direction::Forward => (self.from, self.to),
            Direction::Backward => (self.to, self.from),
        };

        let last = coordinates.len().saturating_sub(1);
        RouteResult {
            geometry: RouteGeometry { coordinates },
            properties: RouteProperties {
                segments,
                summary: RouteSummary { distance, duration },
                way_points: [0, last],
                source: RouteSource::Predefined {
                    from: from.to_string(),
                    to: to.to_string(),
                },
                profile: options.profile,
                preference,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gazetteer::Gazetteer;
    use crate::route_options::RoutePreference;

    use super::*;

    #[test]
    fn test_steps_match_waypoints_and_distance() {
        for route in PredefinedRoute::all() {
            for direction in [Direction::Forward, Direction::Backward] {
                let steps = route.steps(direction);
                assert_eq!(steps.len(), route.waypoints.len() - 1, "{}", route.from);

                let total: f64 = steps.iter().map(|step| step.distance).sum();
                assert_eq!(total, route.distance, "{} -> {}", route.from, route.to);
            }
        }
    }

    #[test]
    fn test_endpoints_are_gazetteer_places() {
        let gazetteer = Gazetteer::builtin();
        for route in PredefinedRoute::all() {
            let from = gazetteer.exact(route.from).unwrap();
            let to = gazetteer.exact(route.to).unwrap();

            let (first_lat, first_lng) = route.waypoints[0];
            let (last_lat, last_lng) = route.waypoints[route.waypoints.len() - 1];
            assert_eq!((from.point.lat, from.point.lng), (first_lat, first_lng));
            assert_eq!((to.point.lat, to.point.lng), (last_lat, last_lng));
        }
    }

    #[test]
    fn test_find_in_both_directions() {
        let (route, direction) = PredefinedRoute::find("canary wharf", "london bridge").unwrap();
        assert_eq!(route.from, "london bridge");
        assert_eq!(direction, Direction::Backward);

        assert!(PredefinedRoute::find("london bridge", "romford").is_none());
    }

    #[test]
    fn test_backward_build_reverses_geometry() {
        let (route, _) = PredefinedRoute::find("london bridge", "canary wharf").unwrap();
        let options = RouteOptions::default();

        let forward = route.build(Direction::Forward, &options);
        let backward = route.build(Direction::Backward, &options);

        let mut reversed = forward.geometry.coordinates.clone();
        reversed.reverse();
        assert_eq!(backward.geometry.coordinates, reversed);
        assert_eq!(backward.segments()[0].name, "Limehouse Link");
        assert_eq!(
            backward.properties.source,
            RouteSource::Predefined {
                from: "canary wharf".to_string(),
                to: "london bridge".to_string()
            }
        );
    }

    #[test]
    fn test_profile_durations() {
        let (route, direction) = PredefinedRoute::find("rm10 9qb", "uel docklands campus").unwrap();

        let walking = route.build(
            direction,
            &RouteOptions {
                preference: RoutePreference::Recommended,
                profile: TravelProfile::FootWalking,
            },
        );

        assert_eq!(walking.duration(), Seconds::new(8400.0));
        assert_eq!(walking.distance(), Meters::new(11200.0));
    }
}
