//! Display helpers for the presentation layer.

/// Shown in place of a percentage that is undefined.
pub const UNDEFINED_PERCENT: &str = "-";

/// Format a distance in meters as kilometers with two decimals.
///
/// A zero distance is shown as `"0 km"`. Values exactly halfway between two
/// hundredths round up, e.g. 1125 m is `"1.13 km"`.
///
/// # Example
/// ```
/// use bikeway_stats::display_distance_in_km;
/// assert_eq!(display_distance_in_km(0.0), "0 km");
/// assert_eq!(display_distance_in_km(1500.0), "1.50 km");
/// ```
pub fn display_distance_in_km(distance: f64) -> String {
    if distance == 0.0 {
        return "0 km".to_string();
    }
    format!("{} km", to_fixed_2(distance / 1000.0))
}

/// Two-decimal rendering of the exact binary value of `x`, ties rounded away from zero.
fn to_fixed_2(x: f64) -> String {
    // A value halfway between hundredths is (2k + 1) / 200, which is only
    // representable when it is an odd multiple of 1/8.
    let eighths = x * 8.0;
    if eighths.fract() == 0.0 && (eighths % 2.0).abs() == 1.0 {
        let hundredths = (eighths.abs() * 12.5).ceil().copysign(x);
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{:.2}", x)
}

/// Format an already rounded percentage, e.g. `"42%"`.
pub fn display_percent(percent: u32) -> String {
    format!("{}%", percent)
}

/// Format a bucket share that may be undefined (nothing measurable).
///
/// # Example
/// ```
/// use bikeway_stats::display_optional_percent;
/// assert_eq!(display_optional_percent(Some(42)), "42%");
/// assert_eq!(display_optional_percent(None), "-");
/// ```
pub fn display_optional_percent(percent: Option<u32>) -> String {
    percent
        .map(display_percent)
        .unwrap_or_else(|| UNDEFINED_PERCENT.to_string())
}
