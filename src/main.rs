use clap::{Parser, Subcommand};
use scepttr::config::InputFiles;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collagen triple-helix Tm scoring and fitting", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    inputs: InputFiles,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fit propensity and pairwise coefficients against the training library.
    Fit(cmd::fit::FitArgs),
    /// Score every helix of a library and print register reports.
    Score(cmd::score::ScoreArgs),
    /// Score a single helix given on the command line.
    Evaluate(cmd::evaluate::EvaluateArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing SCEPTTr v{}...", env!("CARGO_PKG_VERSION"));
    info!("   Only canonical compositions/registers examined.");

    let result = match cli.command {
        Commands::Fit(args) => cmd::fit::run(args, &cli.inputs),
        Commands::Score(args) => cmd::score::run(args, &cli.inputs),
        Commands::Evaluate(args) => cmd::evaluate::run(args, &cli.inputs),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
