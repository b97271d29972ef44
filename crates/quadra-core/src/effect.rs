//! Core Effect trait.
//!
//! The [`Effect`] trait is the contract between a processor and whatever
//! drives it (a plugin wrapper, the offline renderer, tests).
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. The multiband processor
//!   is strictly one channel in, one channel out.
//!
//! - **Blocks first**: Block-based processors override
//!   [`process_block`](Effect::process_block); per-sample
//!   [`process`](Effect::process) stays available for simple callers.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use quadra_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut out = [0.0; 2];
/// gain.process_block(&[1.0, -1.0], &mut out);
/// assert_eq!(out, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    ///
    /// # Panics
    /// Debug builds panic if `input.len() != output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Update the base sample rate.
    ///
    /// Effects recalculate sample-rate-dependent coefficients before the
    /// next sample is processed.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears filter history without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples at the base rate.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: f32) -> f32 {
            input * self.0
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_default_block() {
        let mut gain = Gain(2.0);
        let input = [1.0, 2.0, 3.0];
        let mut output = [0.0; 3];
        gain.process_block(&input, &mut output);
        assert_eq!(output, [2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_default_latency() {
        let gain = Gain(1.0);
        assert_eq!(gain.latency_samples(), 0);
    }

    #[test]
    fn test_object_safe() {
        let mut boxed: Box<dyn Effect> = Box::new(Gain(3.0));
        assert_eq!(boxed.process(1.0), 3.0);
    }
}
