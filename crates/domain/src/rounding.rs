//! Decimal rounding for monetary and distance figures
//!
//! Every derived figure is rounded half away from zero at a fixed number of
//! decimal places. Binary floating point cannot represent most decimal ties
//! exactly (`1.005` is stored as `1.00499999999999989...`), so a tie is
//! detected with a small relative tolerance before rounding. This keeps the
//! result identical to what a user typing the same numbers into a calculator
//! expects, and identical across every deployment of the engine.

/// Relative tolerance (in ULPs of the scaled value) for detecting a decimal tie
const TIE_TOLERANCE_ULPS: f64 = 4.0;

/// Round `value` to `places` decimal places, half away from zero
///
/// # Examples
///
/// ```
/// use domain::round_half_up;
///
/// assert_eq!(round_half_up(1.005, 2), 1.01);
/// assert_eq!(round_half_up(2.675, 2), 2.68);
/// assert_eq!(round_half_up(1.004, 2), 1.0);
/// assert_eq!(round_half_up(12.345, 1), 12.3);
/// ```
#[must_use]
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let factor = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    let scaled = value.abs() * factor;
    let floor = scaled.floor();
    let fraction = scaled - floor;
    let tolerance = f64::EPSILON * scaled.max(1.0) * TIE_TOLERANCE_ULPS;

    let rounded = if (fraction - 0.5).abs() <= tolerance {
        floor + 1.0
    } else {
        scaled.round()
    };

    (rounded / factor).copysign(value)
}
