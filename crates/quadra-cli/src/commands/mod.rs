//! CLI command implementations.

pub mod common;
pub mod impulse;
pub mod info;
pub mod params;
pub mod process;
