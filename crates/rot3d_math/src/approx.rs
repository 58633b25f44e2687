//! Epsilon comparisons and domain clamping

/// Tolerance used by every approximate comparison in the crate
pub const EPSILON: f64 = 1e-9;

/// True when `a` and `b` differ by less than `eps`
#[inline]
pub fn close_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// Clamp an acos/asin argument into [-1, 1].
///
/// Trace- and dot-derived values drift slightly outside the domain in
/// floating point; without the clamp the inverse trig functions return NaN.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}
