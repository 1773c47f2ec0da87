//! Config command - show or initialise kub.toml

use anyhow::{Context, Result};
use clap::Args;
use kub_core::{KubConfig, config};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective settings to the config file
    #[arg(long)]
    pub init: bool,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    let settings = config::load();

    match config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory on this platform"),
    }
    print!("{}", render(&settings)?);

    if args.init {
        let path = config::save(&settings).context("Failed to write config")?;
        println!("# wrote {}", path.display());
    }

    Ok(())
}

fn render(settings: &KubConfig) -> Result<String> {
    config::to_toml(settings).context("Failed to render config")
}
