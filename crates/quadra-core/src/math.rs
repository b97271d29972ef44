//! Mathematical utility functions for DSP.
//!
//! Level conversions and numeric guards used on the control path and inside
//! the filter recursions. All functions are allocation-free and `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Guards
//!
//! - [`sanitize`] - Map NaN/Inf host values to a neutral zero
//! - [`flush_denormal_f64`] - Keep recursions out of the subnormal range

use libm::{logf, powf};

/// Convert decibels to linear gain: `10^(0.05 · dB)`.
///
/// Called when a gain parameter is written, never per sample.
///
/// # Example
/// ```rust
/// use quadra_core::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(-40.0) - 0.01).abs() < 1e-6);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    powf(10.0, 0.05 * db)
}

/// Convert linear gain to decibels.
///
/// Values at or below zero are floored at -200 dB.
///
/// # Example
/// ```rust
/// use quadra_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Replace NaN and infinities with `0.0`.
///
/// Host-supplied parameter values pass through this before clamping, so the
/// audio path only ever sees finite numbers.
///
/// # Example
/// ```rust
/// use quadra_core::sanitize;
///
/// assert_eq!(sanitize(f32::NAN), 0.0);
/// assert_eq!(sanitize(f32::INFINITY), 0.0);
/// assert_eq!(sanitize(-3.5), -3.5);
/// ```
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Flush tiny IIR state values to zero before they reach the subnormal range.
///
/// The threshold sits far below anything that can reach an `f32` output.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal_f64(x: f64) -> f64 {
    if x.abs() < 1e-30 { 0.0 } else { x }
}
