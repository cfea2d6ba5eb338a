//! Float → index conversions that do not need `std` (`f64::floor`/`ceil` live in `std`).
//!
//! All helpers expect a finite, non-negative input; `as` casts saturate, so very large ratios
//! clamp to `usize::MAX` and are bounded by the caller.

/// `floor(x)` as an index.
pub(crate) fn floor_index(x: f64) -> usize {
    if !(x > 0.0) {
        return 0;
    }
    x as usize
}

/// `ceil(x)` as an index.
pub(crate) fn ceil_index(x: f64) -> usize {
    if !(x > 0.0) {
        return 0;
    }
    let t = x as usize;
    if (t as f64) < x { t.saturating_add(1) } else { t }
}

/// Replaces non-finite values with zero and negative values with zero.
pub(crate) fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 { x } else { 0.0 }
}
