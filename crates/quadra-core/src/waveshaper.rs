//! Fuzz waveshaper: the per-band saturation curve.
//!
//! ```text
//! g = 150 · drive
//! y = (3 + g) · (π/9) · x / (π + g · |x|)
//! ```
//!
//! The curve is odd and memoryless. Near zero its slope is `(3 + g) / 9`,
//! so higher drive means more small-signal gain. For large `|x|` the output
//! approaches `±(3 + g) · π / (9 · g)`.
//! At drive 0 the curve degenerates to the straight line `x / 3`.
//!
//! The curve is evaluated in `f64`: `g · |x|` cannot overflow for any
//! finite `f32` input, so the output stays finite and bounded by
//! [`saturation_level`] without clamping.

use core::f64::consts::PI;

/// Drive-to-gain scale.
pub const DRIVE_SCALE: f32 = 150.0;

/// Fixed 20° angle term, in radians.
const ANGLE: f64 = PI / 9.0;

#[inline]
fn gain(drive: f32) -> f64 {
    f64::from(DRIVE_SCALE) * f64::from(drive)
}

/// Apply the fuzz curve to one sample.
///
/// `drive` is expected in \[0, 1\].
///
/// # Example
///
/// ```rust
/// use quadra_core::waveshaper::fuzz;
///
/// assert_eq!(fuzz(0.0, 0.8), 0.0);
/// assert!((fuzz(0.3, 0.0) - 0.1).abs() < 1e-6);
/// assert_eq!(fuzz(-0.5, 0.6), -fuzz(0.5, 0.6));
/// ```
#[inline]
pub fn fuzz(x: f32, drive: f32) -> f32 {
    let g = gain(drive);
    let x = f64::from(x);
    ((3.0 + g) * ANGLE * x / (PI + g * x.abs())) as f32
}

/// Apply the fuzz curve in place to every sample of `buffer`.
#[inline]
pub fn fuzz_block(buffer: &mut [f32], drive: f32) {
    let g = gain(drive);
    let numerator = (3.0 + g) * ANGLE;
    for sample in buffer.iter_mut() {
        let x = f64::from(*sample);
        *sample = (numerator * x / (PI + g * x.abs())) as f32;
    }
}

/// Output magnitude the curve approaches as `|x| → ∞`.
///
/// Returns `f32::INFINITY` at drive 0, where the curve is linear.
pub fn saturation_level(drive: f32) -> f32 {
    let g = gain(drive);
    if g <= 0.0 {
        return f32::INFINITY;
    }
    ((3.0 + g) * ANGLE / g) as f32
}
