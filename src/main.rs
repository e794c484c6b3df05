//! Pipeplan CLI, the dataset preprocessing plan compiler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pipeplan",
    version,
    about = "Dataset preprocessing plan compiler: minimal retype/drop pipelines, BLAKE3 plan identity"
)]
struct Cli {
    #[command(subcommand)]
    command: pipeplan::cli::Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PIPEPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = pipeplan::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
