//! File-based effect processing command.

use super::common::{EffectArgs, print_levels};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use quadra_cli::{WavSpec, read_wav, write_wav};
use quadra_core::Effect;
use quadra_effects::Quadrafuzz;
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    effect: EffectArgs,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("Block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} samples, {} Hz, {:.2}s{}",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate,
        if spec.channels > 1 { ", mixed to mono" } else { "" }
    );

    let params = args.effect.build_params()?;
    let mut fuzz = Quadrafuzz::with_params(sample_rate, params);
    let snapshot = fuzz.params().snapshot();
    if snapshot.bypass {
        println!("Bypass engaged, copying input");
    } else {
        println!(
            "Processing with {} oversampling (latency {} samples)...",
            snapshot.oversampling.label(),
            fuzz.latency_samples()
        );
    }

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output = vec![0.0; samples.len()];
    for (in_chunk, out_chunk) in samples
        .chunks(args.block_size)
        .zip(output.chunks_mut(args.block_size))
    {
        fuzz.process_block(in_chunk, out_chunk);
        pb.inc(in_chunk.len() as u64);
    }

    pb.finish_and_clear();
    tracing::debug!(frames = samples.len(), block_size = args.block_size, "render finished");

    println!("\nStats:");
    print_levels("Input ", &samples);
    print_levels("Output", &output);

    let out_spec = WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
