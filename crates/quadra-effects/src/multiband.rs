//! Four-band split, shape and recombine engine.
//!
//! # Signal Path
//!
//! ```text
//!                   ┌─► LP 147 Hz  ─► fuzz(low) ──────┐
//!                   ├─► BP 587 Hz  ─► fuzz(mid-low) ──┤
//! x·in ─► wet ─► ↑R ┤                                 ├─► Σ ─► ↓R ─► out ─┐
//!   │               ├─► BP 2490 Hz ─► fuzz(mid-high) ─┤                   │
//!   │               └─► HP 4980 Hz ─► fuzz(high) ─────┘                   ▼
//!   └─► dry ─────────────────────────────────────────────────────────────► + ─► y
//! ```
//!
//! Blocks of any length are cut into chunks of at most [`CHUNK_SIZE`] frames,
//! so every scratch buffer has a fixed size of `CHUNK_SIZE × 8` samples and
//! processing never allocates.
//!
//! The oversampling ratio is checked once at the top of each block. A change
//! (or a new sample rate) re-tunes all four filters to the new effective rate
//! and clears the filter and oversampler memory before the first sample.

use quadra_core::{
    BandFilter, BandRole, MAX_OVERSAMPLE_FACTOR, NoOversampler, Oversampler, OversamplingRatio,
    Resampler, fuzz_block,
};

use crate::params::ParamSnapshot;

/// Maximum frames processed per inner pass.
pub const CHUNK_SIZE: usize = 64;

const SCRATCH_LEN: usize = CHUNK_SIZE * MAX_OVERSAMPLE_FACTOR;

/// The four band filters and their oversampled scratch space.
#[derive(Debug, Clone)]
struct BandBank {
    filters: [BandFilter; 4],
    /// Upsampled wet input, shared by all bands.
    wet: [f32; SCRATCH_LEN],
    /// Filtered and shaped output per band.
    bands: [[f32; SCRATCH_LEN]; 4],
}

impl BandBank {
    fn new() -> Self {
        Self {
            filters: BandRole::ALL.map(BandFilter::new),
            wet: [0.0; SCRATCH_LEN],
            bands: [[0.0; SCRATCH_LEN]; 4],
        }
    }

    fn configure(&mut self, effective_rate: f32) {
        for filter in &mut self.filters {
            filter.set_sample_rate(effective_rate);
            filter.reset();
        }
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
    }

    /// Mix dry and wet paths for one block through resampler `os`.
    fn run<O: Resampler>(
        &mut self,
        os: &mut O,
        input: &[f32],
        output: &mut [f32],
        params: &ParamSnapshot,
    ) {
        let ratio = O::RATIO;
        let input_gain = params.input_gain.linear();
        let dry_gain = params.dry_gain.linear();
        let wet_gain = params.wet_gain.linear();
        let output_gain = params.output_gain.linear();

        for (in_chunk, out_chunk) in input.chunks(CHUNK_SIZE).zip(output.chunks_mut(CHUNK_SIZE)) {
            let len = in_chunk.len() * ratio;

            for (i, (&x, y)) in in_chunk.iter().zip(out_chunk.iter_mut()).enumerate() {
                let x = input_gain * x;
                *y = dry_gain * x;

                let base = i * ratio;
                self.wet[base] = os.upsample(wet_gain * x);
                for phase in 1..ratio {
                    self.wet[base + phase] = os.uppad(phase);
                }
            }

            let wet = &self.wet[..len];
            for ((filter, band), &drive) in self
                .filters
                .iter_mut()
                .zip(self.bands.iter_mut())
                .zip(&params.drive)
            {
                let band = &mut band[..len];
                filter.process(wet, band);
                fuzz_block(band, drive);
            }

            let [low, mid_low, mid_high, high] = &self.bands;
            let sum = |k: usize| low[k] + mid_low[k] + mid_high[k] + high[k];
            for (i, y) in out_chunk.iter_mut().enumerate() {
                let base = i * ratio;
                let decimated = os.downsample(sum(base));
                for k in base + 1..base + ratio {
                    os.downstore(sum(k));
                }
                *y += output_gain * decimated;
            }
        }
    }
}

/// Block orchestrator of the multiband fuzz.
///
/// Owns one oversampler per supported ratio so that switching never
/// allocates; only the active one carries state.
///
/// # Example
///
/// ```rust
/// use quadra_core::OversamplingRatio;
/// use quadra_effects::{MultibandEngine, ParamSnapshot};
///
/// let mut engine = MultibandEngine::new(48000.0);
/// let params = ParamSnapshot {
///     oversampling: OversamplingRatio::X2,
///     ..ParamSnapshot::default()
/// };
///
/// let input = [0.25f32; 300];
/// let mut output = [0.0f32; 300];
/// engine.process(&input, &mut output, &params);
///
/// assert_eq!(engine.active_ratio(), Some(OversamplingRatio::X2));
/// assert!(output.iter().all(|y| y.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct MultibandEngine {
    sample_rate: f32,
    /// Ratio the filters are tuned for; `None` until the first block.
    active: Option<OversamplingRatio>,
    bank: BandBank,
    os2: Oversampler<2>,
    os4: Oversampler<4>,
    os8: Oversampler<8>,
}

impl MultibandEngine {
    /// Create an engine for a base sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            active: None,
            bank: BandBank::new(),
            os2: Oversampler::new(),
            os4: Oversampler::new(),
            os8: Oversampler::new(),
        }
    }

    /// Base sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the base sample rate.
    ///
    /// The next block re-tunes and clears everything, exactly as on a
    /// ratio change.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.active = None;
    }

    /// The ratio the engine is currently configured for.
    pub fn active_ratio(&self) -> Option<OversamplingRatio> {
        self.active
    }

    /// Clear all filter and oversampler memory.
    pub fn reset(&mut self) {
        self.bank.reset();
        self.os2.reset();
        self.os4.reset();
        self.os8.reset();
    }

    /// Wet-path delay in base-rate samples at `ratio`.
    pub fn latency_samples(&self, ratio: OversamplingRatio) -> usize {
        match ratio {
            OversamplingRatio::X1 => NoOversampler.latency_samples(),
            OversamplingRatio::X2 => self.os2.latency_samples(),
            OversamplingRatio::X4 => self.os4.latency_samples(),
            OversamplingRatio::X8 => self.os8.latency_samples(),
        }
    }

    /// Process one block with the given parameters.
    ///
    /// # Panics
    /// Debug builds panic if the buffers differ in length. Release builds
    /// process the shorter of the two.
    pub fn process(&mut self, input: &[f32], output: &mut [f32], params: &ParamSnapshot) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        let frames = input.len().min(output.len());
        let (input, output) = (&input[..frames], &mut output[..frames]);

        if params.bypass {
            output.copy_from_slice(input);
            return;
        }

        let ratio = params.oversampling;
        if self.active != Some(ratio) {
            self.reconfigure(ratio);
        }

        match ratio {
            OversamplingRatio::X1 => self.bank.run(&mut NoOversampler, input, output, params),
            OversamplingRatio::X2 => self.bank.run(&mut self.os2, input, output, params),
            OversamplingRatio::X4 => self.bank.run(&mut self.os4, input, output, params),
            OversamplingRatio::X8 => self.bank.run(&mut self.os8, input, output, params),
        }
    }

    fn reconfigure(&mut self, ratio: OversamplingRatio) {
        let effective_rate = self.sample_rate * ratio.factor() as f32;
        self.bank.configure(effective_rate);
        match ratio {
            OversamplingRatio::X1 => {}
            OversamplingRatio::X2 => self.os2.reset(),
            OversamplingRatio::X4 => self.os4.reset(),
            OversamplingRatio::X8 => self.os8.reset(),
        }
        self.active = Some(ratio);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "multiband reconfigure: {} at {} Hz (filters at {} Hz)",
            ratio.label(),
            self.sample_rate,
            effective_rate
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_core::Gain;

    const SAMPLE_RATE: f32 = 48000.0;

    fn snapshot(ratio: OversamplingRatio) -> ParamSnapshot {
        ParamSnapshot {
            oversampling: ratio,
            ..ParamSnapshot::default()
        }
    }

    fn noise(len: usize) -> Vec<f32> {
        // Deterministic LCG, no external RNG needed for a fixed buffer
        let mut state = 0x1234_5678u32;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    #[test]
    fn bypass_copies_input() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        let params = ParamSnapshot {
            bypass: true,
            input_gain: Gain::from_db(10.0),
            ..ParamSnapshot::default()
        };
        let input = noise(200);
        let mut output = vec![0.0; 200];
        engine.process(&input, &mut output, &params);
        assert_eq!(input, output);
        assert_eq!(engine.active_ratio(), None, "bypass must not reconfigure");
    }

    #[test]
    fn first_block_configures() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        assert_eq!(engine.active_ratio(), None);

        let mut output = [0.0; 16];
        engine.process(&[0.0; 16], &mut output, &snapshot(OversamplingRatio::X4));
        assert_eq!(engine.active_ratio(), Some(OversamplingRatio::X4));
        assert_eq!(engine.bank.filters[0].coefficients(), {
            let mut f = BandFilter::new(BandRole::Low);
            f.set_sample_rate(SAMPLE_RATE * 4.0);
            f.coefficients()
        });
    }

    #[test]
    fn sample_rate_change_invalidates_configuration() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        let params = snapshot(OversamplingRatio::X2);
        let mut output = [0.0; 8];
        engine.process(&[0.1; 8], &mut output, &params);

        engine.set_sample_rate(44100.0);
        assert_eq!(engine.active_ratio(), None);

        engine.process(&[0.1; 8], &mut output, &params);
        let mut expected = BandFilter::new(BandRole::High);
        expected.set_sample_rate(88200.0);
        assert_eq!(engine.bank.filters[3].coefficients(), expected.coefficients());
    }

    #[test]
    fn silence_in_silence_out() {
        for ratio in OversamplingRatio::ALL {
            let mut engine = MultibandEngine::new(SAMPLE_RATE);
            let mut output = vec![1.0; 500];
            engine.process(&vec![0.0; 500], &mut output, &snapshot(ratio));
            assert!(output.iter().all(|&y| y == 0.0), "{ratio:?}");
        }
    }

    #[test]
    fn dry_only_path_is_scaled_input() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        let params = ParamSnapshot {
            input_gain: Gain::from_db(-6.0),
            dry_gain: Gain::UNITY,
            wet_gain: Gain::from_db(-40.0),
            output_gain: Gain::from_db(-40.0),
            drive: [0.0; 4],
            ..ParamSnapshot::default()
        };
        let input = noise(128);
        let mut output = vec![0.0; 128];
        engine.process(&input, &mut output, &params);

        // Wet contribution is attenuated by 80 dB and the curve is x/3 at zero drive
        let g = params.input_gain.linear();
        for (&x, &y) in input.iter().zip(&output) {
            assert!((y - g * x).abs() < 1e-3, "expected ~{}, got {y}", g * x);
        }
    }

    #[test]
    fn chunking_is_transparent() {
        for ratio in OversamplingRatio::ALL {
            let params = snapshot(ratio);
            let input = noise(256);

            let mut whole = MultibandEngine::new(SAMPLE_RATE);
            let mut expected = vec![0.0; 256];
            whole.process(&input, &mut expected, &params);

            let mut split = MultibandEngine::new(SAMPLE_RATE);
            let mut actual = vec![0.0; 256];
            for (i, o) in input.chunks(64).zip(actual.chunks_mut(64)) {
                split.process(i, o, &params);
            }

            assert_eq!(expected, actual, "{ratio:?}");
        }
    }

    #[test]
    fn ratio_switch_stays_finite() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        let input = noise(128);
        let mut output = vec![0.0; 128];
        for ratio in [
            OversamplingRatio::X8,
            OversamplingRatio::X1,
            OversamplingRatio::X4,
            OversamplingRatio::X2,
            OversamplingRatio::X8,
        ] {
            engine.process(&input, &mut output, &snapshot(ratio));
            assert_eq!(engine.active_ratio(), Some(ratio));
            assert!(output.iter().all(|y| y.is_finite()), "{ratio:?}");
        }
    }

    #[test]
    fn latency_per_ratio() {
        let engine = MultibandEngine::new(SAMPLE_RATE);
        assert_eq!(engine.latency_samples(OversamplingRatio::X1), 0);
        assert_eq!(engine.latency_samples(OversamplingRatio::X2), 31);
        assert_eq!(engine.latency_samples(OversamplingRatio::X4), 15);
        assert_eq!(engine.latency_samples(OversamplingRatio::X8), 7);
    }

    #[test]
    fn reset_clears_tails() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        let params = snapshot(OversamplingRatio::X4);
        let mut output = vec![0.0; 256];
        engine.process(&noise(256), &mut output, &params);

        engine.reset();
        engine.process(&vec![0.0; 256], &mut output, &params);
        assert!(output.iter().all(|&y| y == 0.0));
    }

    #[test]
    fn empty_block_is_a_no_op() {
        let mut engine = MultibandEngine::new(SAMPLE_RATE);
        engine.process(&[], &mut [], &snapshot(OversamplingRatio::X2));
        assert_eq!(engine.active_ratio(), Some(OversamplingRatio::X2));
    }
}
