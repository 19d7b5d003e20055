/// Format a duration in seconds for display, e.g. "1h 30min" or "45min".
/// Sub-minute remainders are floored away.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;

    if hours > 0 {
        format!("{}h {}min", hours, minutes)
    } else {
        format!("{}min", minutes)
    }
}

/// Format a distance in meters for display, e.g. "750 m" or "1.50 km".
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}
