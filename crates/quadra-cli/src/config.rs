//! TOML settings files.
//!
//! A settings file holds one `[params]` table keyed by the snake_case
//! parameter ids:
//!
//! ```toml
//! [params]
//! dry_gain = -12.0
//! low_drive = 0.9
//! oversampling = 4
//! ```
//!
//! Every key is optional. Missing keys keep their defaults and values are
//! clamped to their range when applied.

use quadra_core::{BandRole, OversamplingRatio};
use quadra_effects::{ParamIndex, QuadrafuzzParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Oversampling factor other than 1, 2, 4 or 8
    #[error("invalid oversampling factor {0} (expected 1, 2, 4 or 8)")]
    InvalidOversampling(u32),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Optional value for every effect parameter.
///
/// Used both for the `[params]` table of a settings file and for the
/// command-line overrides, so the two merge field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamValues {
    /// Bypass switch.
    pub bypass: Option<bool>,
    /// Input gain in dB.
    pub input_gain: Option<f32>,
    /// Output gain in dB.
    pub output_gain: Option<f32>,
    /// Dry gain in dB.
    pub dry_gain: Option<f32>,
    /// Wet gain in dB.
    pub wet_gain: Option<f32>,
    /// Low band drive, 0 to 1.
    pub low_drive: Option<f32>,
    /// Lower mid band drive, 0 to 1.
    pub mid_low_drive: Option<f32>,
    /// Upper mid band drive, 0 to 1.
    pub mid_high_drive: Option<f32>,
    /// High band drive, 0 to 1.
    pub high_drive: Option<f32>,
    /// Oversampling factor: 1, 2, 4 or 8.
    pub oversampling: Option<u32>,
}

impl ParamValues {
    /// Fill every unset field of `self` from `base`.
    pub fn or(self, base: ParamValues) -> ParamValues {
        ParamValues {
            bypass: self.bypass.or(base.bypass),
            input_gain: self.input_gain.or(base.input_gain),
            output_gain: self.output_gain.or(base.output_gain),
            dry_gain: self.dry_gain.or(base.dry_gain),
            wet_gain: self.wet_gain.or(base.wet_gain),
            low_drive: self.low_drive.or(base.low_drive),
            mid_low_drive: self.mid_low_drive.or(base.mid_low_drive),
            mid_high_drive: self.mid_high_drive.or(base.mid_high_drive),
            high_drive: self.high_drive.or(base.high_drive),
            oversampling: self.oversampling.or(base.oversampling),
        }
    }

    fn drive(&self, role: BandRole) -> Option<f32> {
        match role {
            BandRole::Low => self.low_drive,
            BandRole::MidLow => self.mid_low_drive,
            BandRole::MidHigh => self.mid_high_drive,
            BandRole::High => self.high_drive,
        }
    }

    /// Write every set value into `params`.
    ///
    /// Fails only on an oversampling factor outside 1, 2, 4, 8; in that case
    /// nothing is written.
    pub fn apply(&self, params: &QuadrafuzzParams) -> Result<()> {
        let ratio = self
            .oversampling
            .map(|factor| {
                OversamplingRatio::from_factor(factor)
                    .ok_or(ConfigError::InvalidOversampling(factor))
            })
            .transpose()?;

        if let Some(bypass) = self.bypass {
            params.set_bypass(bypass);
        }
        let gains = [
            (ParamIndex::InputGain, self.input_gain),
            (ParamIndex::OutputGain, self.output_gain),
            (ParamIndex::DryGain, self.dry_gain),
            (ParamIndex::WetGain, self.wet_gain),
        ];
        for (index, value) in gains {
            if let Some(db) = value {
                params.set(index, db);
            }
        }
        for role in BandRole::ALL {
            if let Some(drive) = self.drive(role) {
                params.set(ParamIndex::drive_of(role), drive);
            }
        }
        if let Some(ratio) = ratio {
            params.set_oversampling(ratio);
        }
        Ok(())
    }
}

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Effect parameter values.
    #[serde(default)]
    pub params: ParamValues,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());

        let params = QuadrafuzzParams::new();
        settings.params.apply(&params).unwrap();
        assert_eq!(params.snapshot(), quadra_effects::ParamSnapshot::default());
    }

    #[test]
    fn parses_params_table() {
        let settings = Settings::from_toml_str(
            "[params]\nbypass = true\ndry_gain = -12.0\nhigh_drive = 0.25\noversampling = 4\n",
        )
        .unwrap();

        let params = QuadrafuzzParams::new();
        settings.params.apply(&params).unwrap();
        assert!(params.bypass());
        assert_eq!(params.get(ParamIndex::DryGain), -12.0);
        assert_eq!(params.drive(BandRole::High), 0.25);
        assert_eq!(params.oversampling(), OversamplingRatio::X4);
        // untouched
        assert_eq!(params.drive(BandRole::Low), 0.6);
    }

    #[test]
    fn values_are_clamped() {
        let values = ParamValues {
            input_gain: Some(50.0),
            low_drive: Some(-3.0),
            ..ParamValues::default()
        };
        let params = QuadrafuzzParams::new();
        values.apply(&params).unwrap();
        assert_eq!(params.get(ParamIndex::InputGain), 10.0);
        assert_eq!(params.drive(BandRole::Low), 0.0);
    }

    #[test]
    fn rejects_bad_oversampling() {
        let values = ParamValues {
            dry_gain: Some(0.0),
            oversampling: Some(3),
            ..ParamValues::default()
        };
        let params = QuadrafuzzParams::new();
        assert!(matches!(
            values.apply(&params),
            Err(ConfigError::InvalidOversampling(3))
        ));
        assert_eq!(params.get(ParamIndex::DryGain), -40.0);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            Settings::from_toml_str("[params]\ndrive = 1.0\n"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn command_line_overrides_file() {
        let file = ParamValues {
            dry_gain: Some(-6.0),
            wet_gain: Some(-3.0),
            ..ParamValues::default()
        };
        let flags = ParamValues {
            dry_gain: Some(0.0),
            ..ParamValues::default()
        };
        let merged = flags.or(file);
        assert_eq!(merged.dry_gain, Some(0.0));
        assert_eq!(merged.wet_gain, Some(-3.0));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load("/nonexistent/quadra.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quadra.toml"));
    }
}
