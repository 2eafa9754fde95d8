//! Elastica CLI: run and validate soft-body scenarios.

use clap::{Parser, Subcommand};

mod commands;
mod scenario;

#[derive(Parser)]
#[command(name = "elastica")]
#[command(version, about = "Elastica — XPBD soft-body simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a config file.
    Simulate {
        /// Path to scenario config (TOML or JSON).
        #[arg(short, long, default_value = "scenario.toml")]
        config: String,
    },

    /// Validate a scenario config file.
    Validate {
        /// Path to scenario config (TOML or JSON).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate { config } => commands::simulate(&config),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
