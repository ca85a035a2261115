use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

pub fn parse_positive_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    let duration = parse_duration(input)?;
    if duration.is_zero() || duration.is_negative() {
        return Err(String::from("Expected a duration greater than zero"));
    }
    Ok(duration)
}

pub fn parse_non_negative(input: &str) -> Result<f64, String> {
    match input.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err(String::from("Expected a non-negative number")),
        Err(error) => Err(error.to_string()),
    }
}
