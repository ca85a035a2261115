/// `"999 m"` below one kilometer, `"1.5 km"` from there on.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// `"1 hr 5 min"` or `"10 min"`. Partial minutes are truncated.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(999.0), "999 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1500.0), "1.5 km");
        assert_eq!(format_distance(11200.0), "11.2 km");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0 min");
        assert_eq!(format_duration(90.0), "1 min");
        assert_eq!(format_duration(600.0), "10 min");
        assert_eq!(format_duration(3600.0), "1 hr 0 min");
        assert_eq!(format_duration(3900.0), "1 hr 5 min");
    }
}
