//! Quadra Core - DSP primitives for multiband distortion
//!
//! This crate provides the building blocks of the quadra multiband fuzz,
//! designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for mono audio processors
//! - [`ParameterInfo`] - Indexed parameter introspection for hosts and CLIs
//! - [`AtomicParam`] / [`AtomicGain`] - Lock-free parameter storage shared
//!   between a control thread and the audio thread
//!
//! ## Filters
//!
//! - [`BandFilter`] - Second-order band-split filter with RBJ cookbook
//!   coefficients (lowpass, bandpass or highpass by [`BandRole`])
//!
//! ## Nonlinearity
//!
//! - [`fuzz`] / [`fuzz_block`] - The per-band saturation curve
//!
//! ## Anti-Aliasing
//!
//! - [`Oversampler`] - Polyphase windowed-sinc interpolator/decimator
//! - [`NoOversampler`] - The identity, for ratio 1
//! - [`OversamplingRatio`] - Runtime ratio selection
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`sanitize`],
//!   [`flush_denormal_f64`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! quadra-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod atomic_param;
pub mod biquad;
pub mod effect;
pub mod gain;
pub mod math;
pub mod oversample;
pub mod param_info;
pub mod waveshaper;

// Re-export main types at crate root
pub use atomic_param::{AtomicGain, AtomicParam};
pub use biquad::{BAND_Q, BandFilter, BandRole, Coefficients, FilterKind};
pub use effect::Effect;
pub use gain::{GAIN_MAX_DB, GAIN_MIN_DB, Gain, gain_param_descriptor};
pub use math::{db_to_linear, flush_denormal_f64, linear_to_db, sanitize};
pub use oversample::{
    FIR_TAPS, MAX_OVERSAMPLE_FACTOR, NoOversampler, Oversampler, OversamplingRatio, Resampler,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use waveshaper::{fuzz, fuzz_block, saturation_level};
