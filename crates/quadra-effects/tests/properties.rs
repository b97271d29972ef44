//! Property-based tests for the quadrafuzz effect.
//!
//! Uses proptest to verify the block-level invariants over random parameter
//! settings: bypass identity, finite and bounded output, block-splitting
//! transparency, and stability across oversampling ratio switches.

use proptest::prelude::*;
use quadra_core::{Effect, OversamplingRatio, ParameterInfo};
use quadra_effects::{MultibandEngine, ParamSnapshot, Quadrafuzz};

/// Set every parameter except bypass from normalized [0, 1] values.
fn set_random_params(effect: &mut Quadrafuzz, values: &[f32; 10]) {
    for i in 1..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.denormalize(values[i]));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With bypass on, output equals input sample-for-sample, whatever the
    /// other parameters are.
    #[test]
    fn bypass_is_identity(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..300),
        values in prop::array::uniform10(0.0f32..=1.0f32),
    ) {
        let mut fuzz = Quadrafuzz::new(48000.0);
        set_random_params(&mut fuzz, &values);
        fuzz.set_param(0, 1.0);

        let mut output = vec![0.0; input.len()];
        fuzz.process_block(&input, &mut output);
        prop_assert_eq!(input, output);
    }

    /// For input in [-1, 1] and any parameter values, output is finite and
    /// bounded. Gain staging allows well above unity (+10 dB in, on both
    /// paths, and out) but nothing may blow up.
    #[test]
    fn output_finite_and_bounded(
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..512),
        values in prop::array::uniform10(0.0f32..=1.0f32),
    ) {
        let mut fuzz = Quadrafuzz::new(48000.0);
        set_random_params(&mut fuzz, &values);

        let mut output = vec![0.0; input.len()];
        fuzz.process_block(&input, &mut output);
        for (i, &y) in output.iter().enumerate() {
            prop_assert!(y.is_finite(), "non-finite output {} at {}", y, i);
            prop_assert!(y.abs() < 200.0, "output {} at {} exceeds bound", y, i);
        }
    }

    /// Processing a buffer in one call or in arbitrary consecutive pieces
    /// gives bit-identical output.
    #[test]
    fn block_splitting_transparent(
        input in prop::collection::vec(-1.0f32..=1.0f32, 2..400),
        cut_a in 0usize..400,
        cut_b in 0usize..400,
        ratio_idx in 0usize..4,
        drive in prop::array::uniform4(0.0f32..=1.0f32),
    ) {
        let params = ParamSnapshot {
            drive,
            oversampling: OversamplingRatio::ALL[ratio_idx],
            ..ParamSnapshot::default()
        };
        let mut cuts = [cut_a.min(input.len()), cut_b.min(input.len())];
        cuts.sort_unstable();

        let mut whole = MultibandEngine::new(48000.0);
        let mut expected = vec![0.0; input.len()];
        whole.process(&input, &mut expected, &params);

        let mut pieces = MultibandEngine::new(48000.0);
        let mut actual = vec![0.0; input.len()];
        for (start, end) in [(0, cuts[0]), (cuts[0], cuts[1]), (cuts[1], input.len())] {
            pieces.process(&input[start..end], &mut actual[start..end], &params);
        }

        prop_assert_eq!(expected, actual);
    }

    /// Switching the oversampling ratio between consecutive blocks never
    /// produces NaN or infinity in the block that follows.
    #[test]
    fn ratio_switch_stable(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        from in 0usize..4,
        to in 0usize..4,
        values in prop::array::uniform10(0.0f32..=1.0f32),
    ) {
        let mut fuzz = Quadrafuzz::new(44100.0);
        set_random_params(&mut fuzz, &values);
        let mut output = [0.0f32; 32];

        fuzz.params().set_oversampling(OversamplingRatio::ALL[from]);
        fuzz.process_block(&input, &mut output);

        fuzz.params().set_oversampling(OversamplingRatio::ALL[to]);
        fuzz.process_block(&input, &mut output);
        prop_assert!(output.iter().all(|y| y.is_finite()));
    }
}
