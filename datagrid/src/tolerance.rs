//! Tolerance-aware comparisons for layout values.
//!
//! Column edges are sums of many `f64` widths; comparing them exactly makes cells flicker in and
//! out of view on sub-pixel rounding. Every layout decision goes through these helpers instead.

/// Smallest relative step the layout math distinguishes (single precision epsilon).
const EPSILON: f64 = 1.192_093e-7;
const SCALAR_ADJUSTMENT: f64 = 10.0;

#[inline]
fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}

/// Returns `true` when `a` and `b` are equal within the layout tolerance.
pub fn are_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let tolerance = (abs(a) + abs(b) + SCALAR_ADJUSTMENT) * EPSILON;
    let delta = a - b;
    -tolerance < delta && tolerance > delta
}

pub fn greater_than(a: f64, b: f64) -> bool {
    a > b && !are_close(a, b)
}

pub fn greater_than_or_close(a: f64, b: f64) -> bool {
    a > b || are_close(a, b)
}

pub fn less_than(a: f64, b: f64) -> bool {
    a < b && !are_close(a, b)
}

pub fn less_than_or_close(a: f64, b: f64) -> bool {
    a < b || are_close(a, b)
}

pub fn is_zero(a: f64) -> bool {
    are_close(a, 0.0)
}
