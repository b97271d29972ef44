//! List the effect parameters.

use clap::Args;
use quadra_cli::Settings;
use quadra_core::{ParamDescriptor, ParamFlags, ParameterInfo};
use quadra_effects::Quadrafuzz;
use std::path::PathBuf;

/// List the effect parameters and their ranges.
#[derive(Args)]
pub struct ParamsArgs {
    /// Show the values a settings file would apply
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Run the params command.
pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let fuzz = Quadrafuzz::new(48000.0);
    if let Some(path) = &args.config {
        Settings::load(path)?.params.apply(fuzz.params())?;
    }

    println!(
        "{:<3} {:<16} {:<15} {:>16} {:>10} {:>10}",
        "#", "Name", "Key", "Range", "Default", "Value"
    );
    println!("{}", "-".repeat(75));

    for index in 0..fuzz.param_count() {
        let Some(desc) = fuzz.param_info(index) else {
            continue;
        };
        println!(
            "{:<3} {:<16} {:<15} {:>16} {:>10} {:>10}",
            index,
            desc.name,
            config_key(desc.string_id),
            format_range(&desc),
            format_value(&desc, desc.default),
            format_value(&desc, fuzz.get_param(index)),
        );
    }

    println!();
    println!("Keys are accepted in the [params] table of a settings file and as");
    println!("--key-name flags (underscores become dashes).");

    Ok(())
}

/// Settings-file key for a parameter symbol: `MidLowDrive` -> `mid_low_drive`.
fn config_key(symbol: &str) -> String {
    let mut key = String::with_capacity(symbol.len() + 4);
    for (i, c) in symbol.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                key.push('_');
            }
            key.push(c.to_ascii_lowercase());
        } else {
            key.push(c);
        }
    }
    key
}

fn format_range(desc: &ParamDescriptor) -> String {
    if desc.flags.contains(ParamFlags::BYPASS) {
        "off/on".to_string()
    } else if desc.flags.contains(ParamFlags::STEPPED) {
        "1, 2, 4, 8".to_string()
    } else {
        format!("{}..{}{}", desc.min, desc.max, desc.unit.suffix())
    }
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    if desc.flags.contains(ParamFlags::BYPASS) {
        return if value > 0.5 { "on" } else { "off" }.to_string();
    }
    format!("{value}{}", desc.unit.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_cli::ParamValues;
    use quadra_effects::ParamIndex;

    #[test]
    fn keys_match_settings_fields() {
        assert_eq!(config_key("Bypass"), "bypass");
        assert_eq!(config_key("InputGain"), "input_gain");
        assert_eq!(config_key("MidLowDrive"), "mid_low_drive");
        assert_eq!(config_key("Oversampling"), "oversampling");
    }

    #[test]
    fn every_key_is_a_settings_field() {
        for index in ParamIndex::ALL {
            let key = config_key(index.descriptor().string_id);
            let value = match key.as_str() {
                "bypass" => "true",
                "oversampling" => "2",
                _ => "0.5",
            };
            let text = format!("[params]\n{key} = {value}\n");
            let settings = Settings::from_toml_str(&text).unwrap();
            assert_ne!(settings.params, ParamValues::default(), "{key}");
        }
    }

    #[test]
    fn formats_units() {
        let gain = ParamIndex::DryGain.descriptor();
        assert_eq!(format_range(&gain), "-40..10 dB");
        assert_eq!(format_value(&gain, -40.0), "-40 dB");
        assert_eq!(format_range(&ParamIndex::Oversampling.descriptor()), "1, 2, 4, 8");
        assert_eq!(format_value(&ParamIndex::Bypass.descriptor(), 1.0), "on");
    }
}
