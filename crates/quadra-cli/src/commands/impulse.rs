//! Render the impulse response of the effect to a WAV file.

use super::common::{EffectArgs, levels};
use clap::Args;
use quadra_cli::{WavSpec, write_wav};
use quadra_core::{Effect, linear_to_db};
use quadra_effects::Quadrafuzz;
use std::path::PathBuf;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Length of the response in samples
    #[arg(long, default_value = "4800")]
    length: usize,

    #[command(flatten)]
    effect: EffectArgs,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.length == 0 {
        anyhow::bail!("Length must be at least 1 sample");
    }
    if args.sample_rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }

    let params = args.effect.build_params()?;
    let mut fuzz = Quadrafuzz::with_params(args.sample_rate as f32, params);

    let mut impulse = vec![0.0f32; args.length];
    impulse[0] = 1.0;
    let mut response = vec![0.0f32; args.length];
    fuzz.process_block(&impulse, &mut response);

    let (_, peak) = levels(&response);
    let peak_at = response
        .iter()
        .position(|s| s.abs() == peak)
        .unwrap_or_default();
    let energy: f32 = response.iter().map(|s| s * s).sum();

    println!("Impulse response, {} samples at {} Hz", args.length, args.sample_rate);
    println!("  First sample: {:.6}", response[0]);
    println!("  Peak:         {:.1} dB at sample {}", linear_to_db(peak), peak_at);
    println!("  Energy:       {:.6}", energy);
    println!("  Latency:      {} samples", fuzz.latency_samples());

    let spec = WavSpec {
        channels: 1,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&args.output, &response, spec)?;
    println!("Wrote {}", args.output.display());

    Ok(())
}
