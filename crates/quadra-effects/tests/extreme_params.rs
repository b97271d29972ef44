//! Extreme parameter tests for the quadrafuzz effect.
//!
//! Verifies that the effect produces finite (non-NaN, non-Inf) output when
//! parameters are set to their minimum and maximum values, at every
//! oversampling ratio, at extreme sample rates (8 kHz and 192 kHz), and when
//! the host hands it non-finite values or very large input.

use quadra_core::{Effect, OversamplingRatio, ParameterInfo};
use quadra_effects::{ParamIndex, Quadrafuzz};

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const NUM_SAMPLES: usize = 1000;

/// Process `NUM_SAMPLES` through the effect in uneven blocks and assert all
/// outputs are finite.
fn assert_finite_output(effect: &mut Quadrafuzz, amplitude: f32, label: &str) {
    let input: Vec<f32> = (0..NUM_SAMPLES)
        .map(|i| match i % 3 {
            0 => amplitude,
            1 => -amplitude,
            _ => 0.0,
        })
        .collect();
    let mut output = vec![0.0; NUM_SAMPLES];

    for (i, o) in input.chunks(97).zip(output.chunks_mut(97)) {
        effect.process_block(i, o);
    }

    for (i, y) in output.iter().enumerate() {
        assert!(
            y.is_finite(),
            "{}: non-finite output at sample {}: {}",
            label,
            i,
            y
        );
    }
}

/// Set every parameter except bypass to its minimum.
fn set_all_params_min(effect: &mut Quadrafuzz) {
    for i in 1..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.min);
        }
    }
}

/// Set every parameter except bypass to its maximum.
fn set_all_params_max(effect: &mut Quadrafuzz) {
    for i in 1..effect.param_count() {
        if let Some(desc) = effect.param_info(i) {
            effect.set_param(i, desc.max);
        }
    }
}

fn run_at(sample_rate: f32, ratio: OversamplingRatio) {
    let label = format!("{} Hz, {}", sample_rate, ratio.label());

    // All params at minimum
    {
        let mut effect = Quadrafuzz::new(sample_rate);
        set_all_params_min(&mut effect);
        effect.params().set_oversampling(ratio);
        assert_finite_output(&mut effect, 0.5, &format!("{label} (all min)"));
    }

    // All params at maximum
    {
        let mut effect = Quadrafuzz::new(sample_rate);
        set_all_params_max(&mut effect);
        effect.params().set_oversampling(ratio);
        assert_finite_output(&mut effect, 0.5, &format!("{label} (all max)"));
    }

    // Defaults with a very hot input
    {
        let mut effect = Quadrafuzz::new(sample_rate);
        effect.params().set_oversampling(ratio);
        assert_finite_output(&mut effect, 1000.0, &format!("{label} (hot input)"));
    }
}

#[test]
fn test_extreme_default_rate() {
    for ratio in OversamplingRatio::ALL {
        run_at(DEFAULT_SAMPLE_RATE, ratio);
    }
}

#[test]
fn test_extreme_low_rate() {
    for ratio in OversamplingRatio::ALL {
        run_at(LOW_SAMPLE_RATE, ratio);
    }
}

#[test]
fn test_extreme_high_rate() {
    for ratio in OversamplingRatio::ALL {
        run_at(HIGH_SAMPLE_RATE, ratio);
    }
}

#[test]
fn test_non_finite_param_values() {
    let mut effect = Quadrafuzz::new(DEFAULT_SAMPLE_RATE);
    for i in 0..effect.param_count() {
        effect.set_param(i, f32::NAN);
        assert!(effect.get_param(i).is_finite());
    }
    assert_finite_output(&mut effect, 0.5, "NaN params");

    for i in 0..effect.param_count() {
        effect.set_param(i, f32::INFINITY);
    }
    assert_finite_output(&mut effect, 0.5, "infinite params");
}

#[test]
fn test_high_band_above_nyquist() {
    // 4980 Hz sits above Nyquist at 8 kHz without oversampling: the high
    // band goes silent rather than unstable.
    let mut effect = Quadrafuzz::new(LOW_SAMPLE_RATE);
    for index in [ParamIndex::LowDrive, ParamIndex::MidLowDrive, ParamIndex::MidHighDrive] {
        effect.set_param(index.index(), 0.0);
    }
    effect.set_param(ParamIndex::DryGain.index(), -40.0);
    assert_finite_output(&mut effect, 0.5, "8 kHz high band");
}

#[test]
fn test_non_finite_sample_rate() {
    for rate in [f32::NAN, f32::INFINITY, 0.0] {
        for ratio in OversamplingRatio::ALL {
            let mut effect = Quadrafuzz::new(DEFAULT_SAMPLE_RATE);
            effect.params().set_oversampling(ratio);
            effect.set_sample_rate(rate);
            assert_finite_output(&mut effect, 0.5, &format!("{rate} Hz, {}", ratio.label()));
        }
    }
}
