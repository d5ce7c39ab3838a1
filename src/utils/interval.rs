//! Interval arithmetic that stays finite for bounds near the float limits.
//!
//! A box such as `[-f32::MAX, f32::MAX]` has a width that overflows, so every
//! helper falls back to working with halved bounds when `hi - lo` is infinite.
//! The branch taken depends only on the bounds, never on the value, which keeps
//! each mapping monotone in its input.

/// Position of `v` in `[lo, hi]`: 0 at `lo`, 1 at `hi`. Unclamped.
pub fn unit_position(v: f64, lo: f64, hi: f64) -> f64 {
    let width = hi - lo;
    if width.is_finite() {
        (v - lo) / width
    } else {
        (v / 2.0 - lo / 2.0) / (hi / 2.0 - lo / 2.0)
    }
}

/// The point at position `t` in `[lo, hi]`. Finite for finite bounds and `t` in `[0, 1]`.
pub fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    let width = hi - lo;
    if width.is_finite() {
        lo + width * t
    } else {
        2.0 * (lo / 2.0 + (hi / 2.0 - lo / 2.0) * t)
    }
}

/// `ln(hi - lo)` without overflowing the width.
pub fn log_width(lo: f64, hi: f64) -> f64 {
    let width = hi - lo;
    if width.is_finite() {
        width.ln()
    } else {
        (hi / 2.0 - lo / 2.0).ln() + std::f64::consts::LN_2
    }
}
