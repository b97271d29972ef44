//! Quadra CLI - offline renderer for the quadra multiband fuzz.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quadra")]
#[command(author, version, about = "Quadra multiband fuzz CLI", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an audio file through the fuzz
    Process(commands::process::ProcessArgs),

    /// List the effect parameters
    Params(commands::params::ParamsArgs),

    /// Render the impulse response of the fuzz
    Impulse(commands::impulse::ImpulseArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
