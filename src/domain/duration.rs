use crate::domain::model::TransportMode;

/// Estimated travel time in seconds for a distance in meters.
///
/// `round(distance / speed * buffer)`, with a 15% buffer for driving and
/// 10% otherwise to cover stops and traffic lights the raw speed misses.
/// Zero for non-positive distances and for modes without an average speed.
pub fn calculate_duration(distance_meters: f64, mode: TransportMode) -> f64 {
    let Some(speed) = mode.average_speed() else {
        return 0.0;
    };
    if distance_meters <= 0.0 {
        return 0.0;
    }
    let buffer = if mode == TransportMode::Driving {
        1.15
    } else {
        1.10
    };
    (distance_meters / speed * buffer).round()
}

/// Reconcile a provider-reported duration against the local estimate.
///
/// Some providers report the same duration for every mode; a value deviating
/// more than 50% from the estimate is distrusted entirely and replaced by
/// it. Anything else is clamped into [0.7x, 2.0x] of the estimate. A zero
/// estimate collapses the clamp to zero.
pub fn adjust_duration(api_duration: f64, distance_meters: f64, mode: TransportMode) -> f64 {
    let calculated = calculate_duration(distance_meters, mode);
    if calculated == 0.0 {
        return 0.0;
    }

    let deviation = (api_duration - calculated).abs() / calculated;
    if deviation > 0.5 {
        return calculated;
    }

    api_duration.clamp(calculated * 0.7, calculated * 2.0)
}
