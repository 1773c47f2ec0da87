//! Kub CLI - Inspect shader parameters and data documents
//!
//! # Commands
//!
//! - `kub classify` - List the uniforms a shader pair declares and how they behave
//! - `kub check` - Load a data document and verify it survives a load/save cycle
//! - `kub defaults` - Write the data document a shader pair starts with
//! - `kub config` - Show the effective settings, optionally writing them to kub.toml
//!
//! # Usage
//!
//! ```bash
//! # What does the fog shader expose?
//! kub classify fog.vert fog.frag --consumer fog
//!
//! # Is data.json still readable, and does anything get dropped?
//! kub check data.json --vertex fog.vert --fragment fog.frag --consumer fog
//!
//! # Start a data document for a new shader
//! kub defaults fog.vert fog.frag --consumer fog -o data.json
//!
//! # Create kub.toml with the default settings
//! kub config --init
//! ```

mod check;
mod classify;
mod config;
mod defaults;
mod project;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Kub CLI - Inspect shader parameters and data documents
#[derive(Parser)]
#[command(name = "kub")]
#[command(about = "Inspect Kub shader parameters and data documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the uniforms declared by a shader pair
    Classify(classify::ClassifyArgs),

    /// Load a data document and check that it round-trips
    Check(check::CheckArgs),

    /// Write the default data document for a shader pair
    Defaults(defaults::DefaultsArgs),

    /// Show the effective settings
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify(args) => classify::execute(args),
        Commands::Check(args) => check::execute(args),
        Commands::Defaults(args) => defaults::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}
