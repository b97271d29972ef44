//! Support library for the `quadra` command-line renderer.
//!
//! Holds the pieces the binary and its tests share: WAV file I/O and TOML
//! settings files.

pub mod config;
pub mod wav;

pub use config::{ConfigError, ParamValues, Settings};
pub use wav::{WavError, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};
