//! linout CLI - play and record through the JACK transfer engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linout")]
#[command(author, version, about = "JACK play/record trial runner", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::common::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a file and/or record to a file in a single trial
    PlayRec(commands::play_rec::PlayRecArgs),

    /// Run a batch of trials, pausing between them
    Multi(commands::multi::MultiArgs),

    /// Print the engine's port listing
    Ports,

    /// Print linout and engine versions
    Version,

    /// Report whether the audio server is running
    Status,

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),

    /// Show effective settings
    Config(commands::config::ConfigArgs),

    /// List saved batch plans
    Plans,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::PlayRec(args) => commands::play_rec::run(&cli.global, args),
        Commands::Multi(args) => commands::multi::run(&cli.global, args),
        Commands::Ports => commands::ports::run(&cli.global),
        Commands::Version => commands::version::run(&cli.global),
        Commands::Status => commands::status::run(&cli.global),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(&cli.global, args),
        Commands::Plans => commands::plans::run(),
    }
}
