//! Quadra Effects - the four-band fuzz
//!
//! This crate assembles the quadra-core primitives into the complete effect:
//!
//! - [`MultibandEngine`] - Block orchestrator: band split, per-band fuzz,
//!   oversampling, dry/wet mixing
//! - [`QuadrafuzzParams`] - Lock-free parameter store, read as one
//!   [`ParamSnapshot`] per block
//! - [`Quadrafuzz`] - The engine and its parameters behind the
//!   [`Effect`](quadra_core::Effect) and
//!   [`ParameterInfo`](quadra_core::ParameterInfo) traits
//!
//! ## Example
//!
//! ```rust
//! use quadra_core::{BandRole, Effect, OversamplingRatio};
//! use quadra_effects::Quadrafuzz;
//!
//! let mut fuzz = Quadrafuzz::new(48000.0);
//! fuzz.params().set_drive(BandRole::Low, 0.9);
//! fuzz.params().set_oversampling(OversamplingRatio::X4);
//!
//! let input = vec![0.1f32; 512];
//! let mut output = vec![0.0f32; 512];
//! fuzz.process_block(&input, &mut output);
//! ```
//!
//! ## Features
//!
//! - `std` (default): links the standard library
//! - `tracing`: debug log points on reconfiguration and ignored parameter writes

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod multiband;
pub mod params;
pub mod quadrafuzz;

// Re-export main types at crate root
pub use multiband::{CHUNK_SIZE, MultibandEngine};
pub use params::{
    DEFAULT_DRIVE, DEFAULT_DRY_DB, PARAM_COUNT, ParamIndex, ParamSnapshot, QuadrafuzzParams,
};
pub use quadrafuzz::Quadrafuzz;
