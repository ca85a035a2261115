use rand::Rng;
use tracing::debug;

use crate::{
    error::RoutingError,
    geometry::{compute_geometry_distance, lerp},
    geopoint::GeoPoint,
    instructions::{Compass, instruction_text, street_name, turn_between},
    meters::Meters,
    route_options::RouteOptions,
    route_result::{
        Maneuver, RouteGeometry, RouteProperties, RouteResult, RouteSource, RouteSummary,
        Segment,
    },
    router_params::RouterParams,
    seconds::Seconds,
};

/// Share of the minor-axis delta already covered at the corner of the L.
const MINOR_AXIS_LEAD: f64 = 0.2;

/// Below this, both endpoints are treated as the same spot.
const MIN_ROUTE_LENGTH: Meters = Meters::new(1.0);

pub fn leg_count(distance: Meters, params: &RouterParams) -> usize {
    let legs = (distance.value() / params.leg_length.value()).floor() as usize;
    legs.clamp(params.min_legs, params.max_legs.max(params.min_legs))
}

/// Waypoints running along the dominant axis first, then along the other one.
///
/// Endpoints are exact; interior points are jittered by up to `jitter` degrees per axis.
pub fn l_shaped_waypoints<R: Rng + ?Sized>(
    start: &GeoPoint,
    end: &GeoPoint,
    legs: usize,
    jitter: f64,
    rng: &mut R,
) -> Vec<GeoPoint> {
    let legs = legs.max(1);
    let d_lat = end.lat - start.lat;
    let d_lng = end.lng - start.lng;

    // A degree of longitude shrinks with latitude, compare the deltas on the ground.
    let lng_scale = start.lat.to_radians().cos();
    let corner = if d_lat.abs() >= (d_lng * lng_scale).abs() {
        start.offset(d_lat, d_lng * MINOR_AXIS_LEAD)
    } else {
        start.offset(d_lat * MINOR_AXIS_LEAD, d_lng)
    };

    let first_arm = start.haversine_distance(&corner);
    let second_arm = corner.haversine_distance(end);

    let arms: Vec<(GeoPoint, GeoPoint, usize)> =
        if second_arm < MIN_ROUTE_LENGTH || first_arm < MIN_ROUTE_LENGTH || legs == 1 {
            vec![(*start, *end, legs)]
        } else {
            let share = first_arm / (first_arm + second_arm);
            let first_legs = ((legs as f64 * share).round() as usize).clamp(1, legs - 1);
            vec![
                (*start, corner, first_legs),
                (corner, *end, legs - first_legs),
            ]
        };

    let mut points = Vec::with_capacity(legs + 1);
    points.push(*start);
    for (from, to, arm_legs) in arms {
        for i in 1..=arm_legs {
            points.push(lerp(&from, &to, i as f64 / arm_legs as f64));
        }
    }

    let last = points.len() - 1;
    if jitter > 0.0 {
        for point in &mut points[1..last] {
            *point = point.offset(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            );
        }
    }
    points[last] = *end;

    points
}

/// One segment per consecutive pair of points, sharing out `distance` and
/// `duration` by each leg's length.
pub fn build_segments(points: &[GeoPoint], distance: Meters, duration: Seconds) -> Vec<Segment> {
    let legs: Vec<Meters> = points
        .windows(2)
        .map(|pair| pair[0].haversine_distance(&pair[1]))
        .collect();
    let total = compute_geometry_distance(points);

    let mut segments = Vec::with_capacity(legs.len());
    let mut previous_heading: Option<Compass> = None;
    let mut street_index = 0;
    let mut assigned_distance = Meters::ZERO;
    let mut assigned_duration = Seconds::ZERO;

    for (index, leg) in legs.iter().enumerate() {
        let share = if total.is_zero() {
            1.0 / legs.len() as f64
        } else {
            *leg / total
        };

        // The last segment takes the remainder so the totals add up exactly.
        let (segment_distance, segment_duration) = if index + 1 == legs.len() {
            (distance - assigned_distance, duration - assigned_duration)
        } else {
            (distance * share, duration * share)
        };
        assigned_distance += segment_distance;
        assigned_duration += segment_duration;

        let heading = Compass::from_bearing(points[index].bearing(&points[index + 1]));
        let maneuver = match previous_heading {
            None => Maneuver::Depart,
            Some(previous) => turn_between(previous, heading),
        };

        // Continuing straight stays on the same street.
        if previous_heading.is_some() && maneuver != Maneuver::Straight {
            street_index += 1;
        }
        let street = street_name(street_index);

        segments.push(Segment {
            distance: segment_distance,
            duration: segment_duration,
            instruction: instruction_text(maneuver, heading, street),
            name: street.to_string(),
            maneuver,
            way_points: [index, index + 1],
        });

        previous_heading = Some(heading);
    }

    segments
}

pub fn generate_route<R: Rng + ?Sized>(
    start: &GeoPoint,
    end: &GeoPoint,
    options: &RouteOptions,
    params: &RouterParams,
    rng: &mut R,
) -> Result<RouteResult, RoutingError> {
    let profile = options.profile;
    let preference = options.preference;

    let straight = start.haversine_distance(end);
    let road = straight * profile.route_factor();
    let distance = road * preference.distance_factor();
    let duration = (road / profile.average_speed()) * preference.duration_factor();

    let points = if straight < MIN_ROUTE_LENGTH {
        vec![*start, *end]
    } else {
        let legs = leg_count(distance, params);
        l_shaped_waypoints(start, end, legs, params.waypoint_jitter, rng)
    };

    if points.is_empty() {
        return Err(RoutingError::EmptyGeometry);
    }

    debug!(
        "Generated {} waypoints for a {:.0} m {} route",
        points.len(),
        distance.value(),
        profile
    );

    let segments = build_segments(&points, distance, duration);
    let coordinates: Vec<[f64; 2]> = points.iter().map(GeoPoint::lng_lat).collect();
    let last = coordinates.len() - 1;

    Ok(RouteResult {
        geometry: RouteGeometry { coordinates },
        properties: RouteProperties {
            segments,
            summary: RouteSummary { distance, duration },
            way_points: [0, last],
            source: RouteSource::Generated,
            profile,
            preference,
        },
    })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn test_leg_count_is_clamped() {
        let params = RouterParams::default();
        assert_eq!(leg_count(Meters::new(100.0), &params), 4);
        assert_eq!(leg_count(Meters::new(3200.0), &params), 6);
        assert_eq!(leg_count(Meters::new(50_000.0), &params), 20);
    }

    #[test]
    fn test_l_shape_goes_along_major_axis_first() {
        let mut rng = SmallRng::seed_from_u64(7);
        let start = GeoPoint::new(51.50, 0.00);
        // mostly east
        let end = GeoPoint::new(51.51, 0.10);

        let points = l_shaped_waypoints(&start, &end, 10, 0.0, &mut rng);

        assert_eq!(points.len(), 11);
        assert_eq!(points[0], start);
        assert_eq!(points[10], end);

        // the first leg moves mostly east
        let first = points[1];
        assert!((first.lng - start.lng).abs() > (first.lat - start.lat).abs() * 5.0);
    }

    #[test]
    fn test_straight_line_has_single_arm() {
        let mut rng = SmallRng::seed_from_u64(7);
        let start = GeoPoint::new(51.50, 0.05);
        let end = GeoPoint::new(51.54, 0.05);

        let points = l_shaped_waypoints(&start, &end, 4, 0.0, &mut rng);
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|point| point.lng == 0.05));
    }

    #[test]
    fn test_jitter_keeps_endpoints_exact() {
        let mut rng = SmallRng::seed_from_u64(42);
        let start = GeoPoint::new(51.50, 0.00);
        let end = GeoPoint::new(51.55, 0.03);

        let points = l_shaped_waypoints(&start, &end, 8, 0.0005, &mut rng);
        assert_eq!(points.first(), Some(&start));
        assert_eq!(points.last(), Some(&end));
    }

    #[test]
    fn test_segments_share_out_totals() {
        let points = [
            GeoPoint::new(51.50, 0.00),
            GeoPoint::new(51.51, 0.00),
            GeoPoint::new(51.51, 0.02),
            GeoPoint::new(51.50, 0.02),
        ];

        let segments = build_segments(&points, Meters::new(4000.0), Seconds::new(480.0));

        assert_eq!(segments.len(), 3);
        let distance: Meters = segments.iter().map(|s| s.distance).sum();
        let duration: Seconds = segments.iter().map(|s| s.duration).sum();
        assert!((distance.value() - 4000.0).abs() < 1e-6);
        assert!((duration.value() - 480.0).abs() < 1e-6);

        assert_eq!(segments[0].maneuver, Maneuver::Depart);
        assert_eq!(segments[0].instruction, "Head north on High Street");
        assert_eq!(segments[1].maneuver, Maneuver::TurnRight);
        assert_eq!(segments[1].instruction, "Turn right onto Station Road");
        assert_eq!(segments[2].maneuver, Maneuver::TurnRight);
        assert_eq!(segments[2].way_points, [2, 3]);
    }

    #[test]
    fn test_same_start_and_end() {
        let mut rng = SmallRng::seed_from_u64(1);
        let point = GeoPoint::new(51.52, -0.1);

        let route = generate_route(
            &point,
            &point,
            &RouteOptions::default(),
            &RouterParams::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(route.geometry.coordinates.len(), 2);
        assert_eq!(route.segments().len(), 1);
        assert_eq!(route.distance(), Meters::ZERO);
    }
}
