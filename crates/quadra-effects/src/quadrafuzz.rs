//! The quadrafuzz effect: [`MultibandEngine`] driven by a shared
//! [`QuadrafuzzParams`] store.

use alloc::sync::Arc;

use quadra_core::{Effect, ParamDescriptor, ParameterInfo};

use crate::multiband::MultibandEngine;
use crate::params::{PARAM_COUNT, ParamIndex, QuadrafuzzParams};

/// Four-band fuzz distortion.
///
/// Parameters live in an [`Arc<QuadrafuzzParams>`]; clone the handle from
/// [`params`](Self::params) to automate them from another thread while this
/// value is moved into the audio callback.
///
/// # Example
///
/// ```rust
/// use quadra_core::{Effect, ParameterInfo};
/// use quadra_effects::Quadrafuzz;
///
/// let mut fuzz = Quadrafuzz::new(48000.0);
/// let dry = fuzz.find_param_by_name("DryGain").unwrap();
/// fuzz.set_param(dry, -6.0);
///
/// let input = [0.0f32, 0.5, -0.5, 0.25];
/// let mut output = [0.0f32; 4];
/// fuzz.process_block(&input, &mut output);
/// assert!(output.iter().all(|y| y.is_finite()));
/// ```
#[derive(Debug)]
pub struct Quadrafuzz {
    params: Arc<QuadrafuzzParams>,
    engine: MultibandEngine,
}

impl Quadrafuzz {
    /// Create the effect with its own default parameter store.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_params(sample_rate, Arc::new(QuadrafuzzParams::new()))
    }

    /// Create the effect around an existing parameter store.
    pub fn with_params(sample_rate: f32, params: Arc<QuadrafuzzParams>) -> Self {
        Self {
            params,
            engine: MultibandEngine::new(sample_rate),
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<QuadrafuzzParams> {
        &self.params
    }

    /// The underlying engine.
    pub fn engine(&self) -> &MultibandEngine {
        &self.engine
    }
}

impl Effect for Quadrafuzz {
    fn process(&mut self, input: f32) -> f32 {
        let mut output = [0.0];
        self.process_block(&[input], &mut output);
        output[0]
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        let snapshot = self.params.snapshot();
        self.engine.process(input, output, &snapshot);
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.engine.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.engine.reset();
    }

    fn latency_samples(&self) -> usize {
        self.engine.latency_samples(self.params.oversampling())
    }
}

impl ParameterInfo for Quadrafuzz {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        ParamIndex::from_index(index).map(ParamIndex::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        ParamIndex::from_index(index).map_or(0.0, |p| self.params.get(p))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match ParamIndex::from_index(index) {
            Some(p) => self.params.set(p, value),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("quadrafuzz: ignoring parameter index {index}");
            }
        }
    }
}
