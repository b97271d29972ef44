//! Shared CLI helpers used across multiple commands.

use clap::Args;
use quadra_cli::{ParamValues, Settings};
use quadra_core::linear_to_db;
use quadra_effects::QuadrafuzzParams;
use std::path::PathBuf;
use std::sync::Arc;

/// Effect settings accepted by every rendering command.
///
/// Flags override values from `--config`; anything left unset keeps its
/// default.
#[derive(Args, Debug, Default)]
pub struct EffectArgs {
    /// Settings file (TOML) with a [params] table
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pass the input through untouched
    #[arg(long)]
    pub bypass: bool,

    /// Input gain in dB (-40 to 10)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub input_gain: Option<f32>,

    /// Output gain in dB (-40 to 10)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub output_gain: Option<f32>,

    /// Dry gain in dB (-40 to 10)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub dry_gain: Option<f32>,

    /// Wet gain in dB (-40 to 10)
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub wet_gain: Option<f32>,

    /// Low band drive (0 to 1)
    #[arg(long, value_name = "X")]
    pub low_drive: Option<f32>,

    /// Lower mid band drive (0 to 1)
    #[arg(long, value_name = "X")]
    pub mid_low_drive: Option<f32>,

    /// Upper mid band drive (0 to 1)
    #[arg(long, value_name = "X")]
    pub mid_high_drive: Option<f32>,

    /// High band drive (0 to 1)
    #[arg(long, value_name = "X")]
    pub high_drive: Option<f32>,

    /// Oversampling factor (1, 2, 4 or 8)
    #[arg(long, value_name = "FACTOR", value_parser = parse_oversampling)]
    pub oversampling: Option<u32>,
}

impl EffectArgs {
    fn flag_values(&self) -> ParamValues {
        ParamValues {
            bypass: self.bypass.then_some(true),
            input_gain: self.input_gain,
            output_gain: self.output_gain,
            dry_gain: self.dry_gain,
            wet_gain: self.wet_gain,
            low_drive: self.low_drive,
            mid_low_drive: self.mid_low_drive,
            mid_high_drive: self.mid_high_drive,
            high_drive: self.high_drive,
            oversampling: self.oversampling,
        }
    }

    /// Build the parameter store: defaults, then the settings file, then flags.
    pub fn build_params(&self) -> anyhow::Result<Arc<QuadrafuzzParams>> {
        let file_values = match &self.config {
            Some(path) => {
                println!("Loading settings: {}", path.display());
                Settings::load(path)?.params
            }
            None => ParamValues::default(),
        };

        let params = Arc::new(QuadrafuzzParams::new());
        self.flag_values().or(file_values).apply(&params)?;
        tracing::debug!(snapshot = ?params.snapshot(), "effect parameters");
        Ok(params)
    }
}

/// Parse an oversampling factor for clap's `value_parser`.
pub fn parse_oversampling(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(factor @ (1 | 2 | 4 | 8)) => Ok(factor),
        _ => Err(format!(
            "Invalid oversampling factor: '{}' (expected 1, 2, 4 or 8)",
            s
        )),
    }
}

/// RMS and peak of a signal, both linear.
pub fn levels(samples: &[f32]) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let sum_sq: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    let rms = (sum_sq / samples.len() as f64).sqrt() as f32;
    let peak = samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
    (rms, peak)
}

/// Print RMS and peak in dBFS under a label.
pub fn print_levels(label: &str, samples: &[f32]) {
    let (rms, peak) = levels(samples);
    println!(
        "  {label}: RMS {:.1} dB, peak {:.1} dB",
        linear_to_db(rms),
        linear_to_db(peak)
    );
}
