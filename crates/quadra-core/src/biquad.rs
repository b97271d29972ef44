//! Band-splitting biquad filters.
//!
//! Four second-order sections split the spectrum into the bands the fuzz
//! stage works on. Each band has a fixed role, a fixed centre frequency and
//! the maximally-flat Q of 1/√2:
//!
//! | Role | Shape | Centre |
//! |------|-------|--------|
//! | [`BandRole::Low`] | low-pass | 147 Hz |
//! | [`BandRole::MidLow`] | band-pass | 587 Hz |
//! | [`BandRole::MidHigh`] | band-pass | 2490 Hz |
//! | [`BandRole::High`] | high-pass | 4980 Hz |
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas,
//! parameterised on the cutoff normalised to Nyquist
//! (`cutoff_hz / (0.5 · sample_rate)`). Coefficients and state are kept in
//! `f64`: at 8× oversampling the low band sits near 0.0008 of Nyquist, where
//! single-precision poles lose most of their accuracy.

use core::f64::consts::{FRAC_1_SQRT_2, PI};
use libm::{cos, sin, sqrt};

use crate::math::flush_denormal_f64;

/// Q shared by all four bands (Butterworth).
pub const BAND_Q: f64 = FRAC_1_SQRT_2;

/// Response shape of a second-order section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Low-pass.
    Lowpass,
    /// Band-pass with 0 dB peak gain.
    Bandpass,
    /// High-pass.
    Highpass,
}

/// One of the four fixed bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    /// Low band, low-pass at 147 Hz.
    Low,
    /// Mid-low band, band-pass at 587 Hz.
    MidLow,
    /// Mid-high band, band-pass at 2490 Hz.
    MidHigh,
    /// High band, high-pass at 4980 Hz.
    High,
}

impl BandRole {
    /// All bands, lowest first.
    pub const ALL: [BandRole; 4] = [
        BandRole::Low,
        BandRole::MidLow,
        BandRole::MidHigh,
        BandRole::High,
    ];

    /// Centre (or corner) frequency in Hz.
    pub const fn center_hz(self) -> f64 {
        match self {
            BandRole::Low => 147.0,
            BandRole::MidLow => 587.0,
            BandRole::MidHigh => 2490.0,
            BandRole::High => 4980.0,
        }
    }

    /// Filter shape for this band.
    pub const fn kind(self) -> FilterKind {
        match self {
            BandRole::Low => FilterKind::Lowpass,
            BandRole::MidLow | BandRole::MidHigh => FilterKind::Bandpass,
            BandRole::High => FilterKind::Highpass,
        }
    }

    /// Position in [`BandRole::ALL`].
    pub const fn index(self) -> usize {
        match self {
            BandRole::Low => 0,
            BandRole::MidLow => 1,
            BandRole::MidHigh => 2,
            BandRole::High => 3,
        }
    }
}

/// Normalised biquad coefficients (`a0 = 1`).
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficients.
    pub b0: f64,
    /// Feedforward coefficients.
    pub b1: f64,
    /// Feedforward coefficients.
    pub b2: f64,
    /// Feedback coefficients.
    pub a1: f64,
    /// Feedback coefficients.
    pub a2: f64,
}

impl Coefficients {
    /// `y[n] = x[n]`.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// `y[n] = 0`.
    pub const SILENT: Self = Self {
        b0: 0.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build from unnormalised cookbook terms, dividing through by `a0`.
    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Coefficients for `kind` at `cutoff` (normalised to Nyquist) and `q`.
    ///
    /// A cutoff outside the open interval (0, 1) has no cookbook design; the
    /// limiting response is used instead: a low-pass at or above Nyquist
    /// passes everything, a high-pass there blocks everything, a band-pass
    /// outside the band blocks everything, and the reverse holds at or
    /// below 0 Hz. A NaN cutoff blocks everything.
    pub fn design(kind: FilterKind, cutoff: f64, q: f64) -> Self {
        if cutoff.is_nan() {
            return Coefficients::SILENT;
        }
        match kind {
            FilterKind::Lowpass => lowpass(cutoff, q),
            FilterKind::Bandpass => bandpass(cutoff, q),
            FilterKind::Highpass => highpass(cutoff, q),
        }
    }
}

fn lowpass(cutoff: f64, q: f64) -> Coefficients {
    if cutoff >= 1.0 {
        return Coefficients::PASSTHROUGH;
    }
    if cutoff <= 0.0 {
        return Coefficients::SILENT;
    }
    let omega = PI * cutoff;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    Coefficients::normalized(b0, b1, b2, a0, a1, a2)
}

fn highpass(cutoff: f64, q: f64) -> Coefficients {
    if cutoff >= 1.0 {
        return Coefficients::SILENT;
    }
    if cutoff <= 0.0 {
        return Coefficients::PASSTHROUGH;
    }
    let omega = PI * cutoff;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    Coefficients::normalized(b0, b1, b2, a0, a1, a2)
}

fn bandpass(cutoff: f64, q: f64) -> Coefficients {
    if cutoff <= 0.0 || cutoff >= 1.0 {
        return Coefficients::SILENT;
    }
    let omega = PI * cutoff;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    let b0 = alpha;
    let b1 = 0.0;
    let b2 = -alpha;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    Coefficients::normalized(b0, b1, b2, a0, a1, a2)
}

/// A band filter: one biquad section with a fixed [`BandRole`].
///
/// Implements the transposed Direct Form II structure, whose entire memory
/// is the two state variables `s1`, `s2`. State carries across calls, so
/// splitting a buffer into several consecutive `process` calls gives exactly
/// the same output as one call over the whole buffer.
#[derive(Debug, Clone)]
pub struct BandFilter {
    role: BandRole,
    coeffs: Coefficients,
    s1: f64,
    s2: f64,
}

impl BandFilter {
    /// Create a filter for `role` with passthrough coefficients.
    ///
    /// Call [`set_sample_rate`](Self::set_sample_rate) before use.
    pub fn new(role: BandRole) -> Self {
        Self {
            role,
            coeffs: Coefficients::PASSTHROUGH,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// The band this filter isolates.
    pub fn role(&self) -> BandRole {
        self.role
    }

    /// Current coefficients.
    pub fn coefficients(&self) -> Coefficients {
        self.coeffs
    }

    /// Compute coefficients from a cutoff normalised to Nyquist and a Q.
    ///
    /// State is left untouched; call [`reset`](Self::reset) afterwards.
    pub fn set_params(&mut self, normalized_cutoff: f64, q: f64) {
        self.coeffs = Coefficients::design(self.role.kind(), normalized_cutoff, q);
    }

    /// Configure for the rate the filter actually runs at.
    ///
    /// At an oversampling ratio `R` that is `R` times the base rate.
    pub fn set_sample_rate(&mut self, effective_rate: f32) {
        let normalized = self.role.center_hz() / (0.5 * f64::from(effective_rate));
        self.set_params(normalized, BAND_Q);
    }

    /// Zero the two state variables.
    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }

    /// Filter one sample.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let Coefficients { b0, b1, b2, a1, a2 } = self.coeffs;
        let x = f64::from(input);
        let y = b0 * x + self.s1;
        self.s1 = flush_denormal_f64(b1 * x - a1 * y + self.s2);
        self.s2 = flush_denormal_f64(b2 * x - a2 * y);
        y as f32
    }

    /// Filter `input` into `output`.
    ///
    /// # Panics
    /// Debug builds panic if the buffers differ in length.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process_sample(*inp);
        }
    }

    /// Magnitude response at a frequency normalised to Nyquist.
    ///
    /// Evaluates `|H(e^{jω})|` with `ω = π · normalized` from the current
    /// coefficients.
    pub fn magnitude(&self, normalized: f64) -> f64 {
        let Coefficients { b0, b1, b2, a1, a2 } = self.coeffs;
        let w = PI * normalized;
        let (c1, s1) = (cos(w), sin(w));
        let (c2, s2) = (cos(2.0 * w), sin(2.0 * w));

        let num_re = b0 + b1 * c1 + b2 * c2;
        let num_im = -(b1 * s1 + b2 * s2);
        let den_re = 1.0 + a1 * c1 + a2 * c2;
        let den_im = -(a1 * s1 + a2 * s2);

        sqrt((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im))
    }
}
