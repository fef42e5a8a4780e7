//! Rounding shared by every stage that emits device-facing values.

/// Round to 2 decimal places, half away from zero.
///
/// Operates on the binary `f64` value, so `0.125` (exactly representable)
/// rounds to `0.13` while `1.005` (stored as `1.00499…`) rounds to `1.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
