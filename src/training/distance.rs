//! Distance parsing and display helpers.

/// Step applied by the distance input's arrow-key nudging, in kilometers.
pub const DISTANCE_STEP: f64 = 0.1;
/// Lowest value the distance input steps down to.
pub const DISTANCE_MIN: f64 = 0.0;

/// Parse distance text typed by the user.
///
/// Surrounding whitespace is ignored. Returns `None` for anything that is not a
/// finite number strictly greater than zero.
pub fn parse_distance(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Render a distance rounded to one decimal place.
///
/// Values lying exactly halfway between two tenths (`2.25`, `0.75`) round away
/// from zero. Everything else is rounded from its exact binary value, so `0.15`
/// (stored slightly below the midpoint) shows as `0.1`.
pub fn format_distance(distance: f64) -> String {
    if is_midpoint_between_tenths(distance) {
        let tenths = (distance.abs() * 10.0).ceil().copysign(distance);
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{distance:.1}")
}

/// Only odd multiples of a quarter sit exactly between two tenths in binary.
fn is_midpoint_between_tenths(value: f64) -> bool {
    let quarters = value * 4.0;
    quarters.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0
}

/// Apply `steps` arrow-key increments to the text of a distance field.
///
/// Unparseable text is treated as the minimum. The result never drops below
/// [`DISTANCE_MIN`] and is rendered with one decimal place.
pub fn step_distance_text(text: &str, steps: f64) -> String {
    let current = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(DISTANCE_MIN);
    let next = (current + steps * DISTANCE_STEP).max(DISTANCE_MIN);
    let snapped = (next / DISTANCE_STEP).round() * DISTANCE_STEP;
    format_distance(snapped)
}
