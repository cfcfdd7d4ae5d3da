//! Scalar interpolation primitives shared by the evaluator and caption resolver.

use crate::foundation::core::Vec2;

/// Clamp scalar value to normalized range `[0, 1]`.
#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linearly interpolate between two vectors with clamped parameter `t`.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    let t = clamp01(t);
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Normalized position of `x` inside `[x0, x1]`, clamped to `[0, 1]`.
///
/// A degenerate input range maps everything at or past `x1` to `1`.
#[inline]
pub fn progress(x: f64, x0: f64, x1: f64) -> f64 {
    let span = x1 - x0;
    if span <= 0.0 {
        return if x >= x1 { 1.0 } else { 0.0 };
    }
    clamp01((x - x0) / span)
}

/// Map `x` from `[x0, x1]` onto `[y0, y1]`, clamping on both sides.
#[inline]
pub fn interpolate(x: f64, [x0, x1]: [f64; 2], [y0, y1]: [f64; 2]) -> f64 {
    lerp(y0, y1, progress(x, x0, x1))
}

/// Clamp a signed local frame into `[0, duration]`.
#[inline]
pub(crate) fn clamp_local(local: i64, duration: u64) -> u64 {
    u64::try_from(local).map_or(0, |t| t.min(duration))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
