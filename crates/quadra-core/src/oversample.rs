//! Polyphase FIR oversampling for anti-aliased nonlinear processing.
//!
//! Nonlinear stages (waveshaping, saturation) generate harmonics that can
//! exceed Nyquist and alias back into the audible range. Oversampling
//! mitigates this by:
//!
//! 1. **Upsampling**: each input sample becomes `R` samples, interpolated by
//!    a windowed-sinc lowpass ([`Resampler::upsample`] + [`Resampler::uppad`])
//! 2. **Processing**: the nonlinearity runs at `R×` the base rate
//! 3. **Downsampling**: the same lowpass removes everything above the base
//!    band, then every `R`-th sample is kept ([`Resampler::downsample`] +
//!    [`Resampler::downstore`])
//!
//! ## Usage
//!
//! ```rust
//! use quadra_core::{Oversampler, Resampler};
//!
//! let mut os = Oversampler::<4>::new();
//! let mut block = [0.0f32; 4];
//!
//! block[0] = os.upsample(0.5);
//! for phase in 1..4 {
//!     block[phase] = os.uppad(phase);
//! }
//!
//! // ... nonlinear processing on `block` ...
//!
//! let out = os.downsample(block[0]);
//! for &x in &block[1..] {
//!     os.downstore(x);
//! }
//! # let _ = out;
//! ```
//!
//! ## Supported Factors
//!
//! - `1`: [`NoOversampler`], the identity
//! - `2`, `4`, `8`: [`Oversampler`]
//!
//! The ratio is a const generic so every inner loop has a fixed trip count.

use core::f64::consts::PI;
use libm::{sin, sqrt};

/// Maximum supported oversampling factor.
pub const MAX_OVERSAMPLE_FACTOR: usize = 8;

/// Length of the interpolation and decimation kernels.
pub const FIR_TAPS: usize = 64;

/// Kaiser window shape parameter (~65 dB stopband).
const KAISER_BETA: f64 = 6.4;

/// Kernel cutoff as a fraction of the base-rate Nyquist frequency.
const CUTOFF: f64 = 0.5;

/// Oversampling factor selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OversamplingRatio {
    /// No oversampling.
    #[default]
    X1,
    /// 2× oversampling.
    X2,
    /// 4× oversampling.
    X4,
    /// 8× oversampling.
    X8,
}

impl OversamplingRatio {
    /// All ratios in ascending order.
    pub const ALL: [OversamplingRatio; 4] = [
        OversamplingRatio::X1,
        OversamplingRatio::X2,
        OversamplingRatio::X4,
        OversamplingRatio::X8,
    ];

    /// The integer factor (1, 2, 4 or 8).
    pub const fn factor(self) -> usize {
        match self {
            OversamplingRatio::X1 => 1,
            OversamplingRatio::X2 => 2,
            OversamplingRatio::X4 => 4,
            OversamplingRatio::X8 => 8,
        }
    }

    /// Exact lookup; `None` for anything outside {1, 2, 4, 8}.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quadra_core::OversamplingRatio;
    ///
    /// assert_eq!(OversamplingRatio::from_factor(4), Some(OversamplingRatio::X4));
    /// assert_eq!(OversamplingRatio::from_factor(3), None);
    /// ```
    pub const fn from_factor(factor: u32) -> Option<Self> {
        match factor {
            1 => Some(OversamplingRatio::X1),
            2 => Some(OversamplingRatio::X2),
            4 => Some(OversamplingRatio::X4),
            8 => Some(OversamplingRatio::X8),
            _ => None,
        }
    }

    /// Snap a continuous host value to the closest ratio.
    ///
    /// Boundaries sit halfway between neighbours: `< 1.5 → 1`, `< 3 → 2`,
    /// `< 6 → 4`, otherwise `8`. NaN maps to 1.
    pub fn nearest(value: f32) -> Self {
        if value.is_nan() || value < 1.5 {
            OversamplingRatio::X1
        } else if value < 3.0 {
            OversamplingRatio::X2
        } else if value < 6.0 {
            OversamplingRatio::X4
        } else {
            OversamplingRatio::X8
        }
    }

    /// Display label ("none", "2x", "4x", "8x").
    pub const fn label(self) -> &'static str {
        match self {
            OversamplingRatio::X1 => "none",
            OversamplingRatio::X2 => "2x",
            OversamplingRatio::X4 => "4x",
            OversamplingRatio::X8 => "8x",
        }
    }
}

/// Interpolation/decimation engine around a nonlinear stage.
///
/// Per base-rate sample the caller makes exactly `RATIO` upsampling calls
/// (`upsample` then `uppad(1..RATIO)`) and exactly `RATIO` downsampling calls
/// (`downsample` then `RATIO - 1` × `downstore`).
pub trait Resampler {
    /// Oversampling factor.
    const RATIO: usize;

    /// Push one base-rate sample; returns oversampled sample 0 of its period.
    fn upsample(&mut self, input: f32) -> f32;

    /// Oversampled sample `phase` (1..RATIO) of the current period.
    fn uppad(&mut self, phase: usize) -> f32;

    /// Push oversampled sample 0 of a period; returns the decimated output.
    fn downsample(&mut self, input: f32) -> f32;

    /// Push one of the remaining `RATIO - 1` oversampled samples of a period.
    fn downstore(&mut self, input: f32);

    /// Zero all filter memory.
    fn reset(&mut self);

    /// Round-trip delay in base-rate samples.
    fn latency_samples(&self) -> usize;
}

/// The identity resampler (ratio 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOversampler;

impl Resampler for NoOversampler {
    const RATIO: usize = 1;

    #[inline]
    fn upsample(&mut self, input: f32) -> f32 {
        input
    }

    #[inline]
    fn uppad(&mut self, _phase: usize) -> f32 {
        debug_assert!(false, "uppad called on the identity resampler");
        0.0
    }

    #[inline]
    fn downsample(&mut self, input: f32) -> f32 {
        input
    }

    #[inline]
    fn downstore(&mut self, _input: f32) {
        debug_assert!(false, "downstore called on the identity resampler");
    }

    fn reset(&mut self) {}

    fn latency_samples(&self) -> usize {
        0
    }
}

/// Polyphase windowed-sinc oversampler.
///
/// # Signal Path
///
/// ```text
/// Input → zero-stuff ×R → FIR lowpass (gain R) → nonlinearity at R×fs
///       → FIR lowpass (gain 1) → keep every R-th sample → Output
/// ```
///
/// Both kernels are the same 64-tap Kaiser-windowed sinc with its cutoff at
/// half the base-rate Nyquist. The interpolator never multiplies the
/// stuffed zeros: each of the `R` output phases is a 64/R-tap sub-filter
/// over the input history.
///
/// # Memory Usage
///
/// Fixed-size arrays only, suitable for `no_std`:
/// - Kernels: 2 × `FIR_TAPS` × `f32` = 512 bytes
/// - Histories: 2 × `FIR_TAPS` × `f32` = 512 bytes
#[derive(Debug, Clone)]
pub struct Oversampler<const RATIO: usize> {
    up_kernel: [f32; FIR_TAPS],
    down_kernel: [f32; FIR_TAPS],
    /// Base-rate input history; only the first `FIR_TAPS / RATIO` slots are used.
    up_history: [f32; FIR_TAPS],
    up_head: usize,
    down_history: [f32; FIR_TAPS],
    down_head: usize,
}

impl<const RATIO: usize> Oversampler<RATIO> {
    const UP_MASK: usize = FIR_TAPS / RATIO - 1;
    const DOWN_MASK: usize = FIR_TAPS - 1;

    /// Create an oversampler with zeroed history.
    pub fn new() -> Self {
        const {
            assert!(
                RATIO == 2 || RATIO == 4 || RATIO == 8,
                "Oversample factor must be 2, 4, or 8"
            );
        }

        let kernel = design_kernel(CUTOFF * PI / RATIO as f64);
        let sum: f64 = kernel.iter().sum();

        let mut up_kernel = [0.0; FIR_TAPS];
        let mut down_kernel = [0.0; FIR_TAPS];
        for (i, &h) in kernel.iter().enumerate() {
            down_kernel[i] = (h / sum) as f32;
            up_kernel[i] = (h * RATIO as f64 / sum) as f32;
        }

        Self {
            up_kernel,
            down_kernel,
            up_history: [0.0; FIR_TAPS],
            up_head: 0,
            down_history: [0.0; FIR_TAPS],
            down_head: 0,
        }
    }

    /// Get the oversampling factor.
    pub fn factor(&self) -> usize {
        RATIO
    }

    /// Sum the polyphase branch starting at `phase`, newest input at `head`.
    #[inline]
    fn interpolate(&self, phase: usize, head: usize) -> f32 {
        let mut acc = 0.0;
        let mut idx = head;
        for tap in (phase..FIR_TAPS).step_by(RATIO) {
            acc += self.up_kernel[tap] * self.up_history[idx];
            idx = idx.wrapping_sub(1) & Self::UP_MASK;
        }
        acc
    }
}

impl<const RATIO: usize> Default for Oversampler<RATIO> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RATIO: usize> Resampler for Oversampler<RATIO> {
    const RATIO: usize = RATIO;

    #[inline]
    fn upsample(&mut self, input: f32) -> f32 {
        let head = self.up_head;
        self.up_history[head] = input;
        self.up_head = (head + 1) & Self::UP_MASK;
        self.interpolate(0, head)
    }

    #[inline]
    fn uppad(&mut self, phase: usize) -> f32 {
        debug_assert!(phase > 0 && phase < RATIO, "phase {phase} out of 1..{RATIO}");
        let newest = self.up_head.wrapping_sub(1) & Self::UP_MASK;
        self.interpolate(phase % RATIO, newest)
    }

    #[inline]
    fn downsample(&mut self, input: f32) -> f32 {
        let head = self.down_head;
        self.down_history[head] = input;
        self.down_head = (head + 1) & Self::DOWN_MASK;

        let mut acc = 0.0;
        let mut idx = head;
        for &coeff in &self.down_kernel {
            acc += coeff * self.down_history[idx];
            idx = idx.wrapping_sub(1) & Self::DOWN_MASK;
        }
        acc
    }

    #[inline]
    fn downstore(&mut self, input: f32) {
        self.down_history[self.down_head] = input;
        self.down_head = (self.down_head + 1) & Self::DOWN_MASK;
    }

    fn reset(&mut self) {
        self.up_history = [0.0; FIR_TAPS];
        self.down_history = [0.0; FIR_TAPS];
        self.up_head = 0;
        self.down_head = 0;
    }

    fn latency_samples(&self) -> usize {
        // Two linear-phase kernels, (TAPS - 1) / 2 oversampled samples each.
        (FIR_TAPS - 1) / RATIO
    }
}

// ============================================================================
// Kernel Design
// ============================================================================
//
// Windowed-sinc lowpass: h[i] = sin(ω·t) / (ω·t) · kaiser(t), with
// t = i - (N - 1) / 2. For even N every t is a half-integer, so the sinc
// never hits its removable singularity and the kernel is exactly symmetric
// (linear phase).
//
// Reference: A.V. Oppenheim & R.W. Schafer, "Discrete-Time Signal Processing",
// Chapter 7 (FIR filter design using the window method).

/// Unnormalised windowed-sinc lowpass with cutoff `omega` rad/sample.
fn design_kernel(omega: f64) -> [f64; FIR_TAPS] {
    let mut kernel = [0.0; FIR_TAPS];
    let center = (FIR_TAPS - 1) as f64 / 2.0;
    let norm = bessel_i0(KAISER_BETA);

    for (i, h) in kernel.iter_mut().enumerate() {
        let t = i as f64 - center;
        let phi = omega * t;
        let sinc = sin(phi) / phi;

        let r = t / center;
        let window = bessel_i0(KAISER_BETA * sqrt((1.0 - r * r).max(0.0))) / norm;

        *h = sinc * window;
    }

    kernel
}

/// Zeroth-order modified Bessel function of the first kind (power series).
fn bessel_i0(x: f64) -> f64 {
    let half = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;
    while term > sum * 1e-12 {
        let ratio = half / k;
        term *= ratio * ratio;
        sum += term;
        k += 1.0;
    }
    sum
}
