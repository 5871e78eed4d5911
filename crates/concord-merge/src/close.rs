//! Numeric closeness predicate
//!
//! Two values are close when `|a - b| <= atol + rtol * |b|`. With `atol`
//! zero this is a pure relative comparison; with `rtol` zero it is a pure
//! absolute one. Combining both lets the absolute tolerance cover values
//! near zero while the relative tolerance scales with magnitude.

/// Default relative tolerance.
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Default absolute tolerance.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Check whether `a` is close to the reference value `b`.
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}
