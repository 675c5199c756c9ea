//! Lucida command-line interface.
//!
//! Reconstruct holograms from TOML job files:
//! ```sh
//! lucida-cli reconstruct job.toml
//! lucida-cli validate job.toml
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lucida-cli")]
#[command(about = "Lucida: numerical hologram reconstruction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconstruction job from a TOML configuration file.
    Reconstruct {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides the config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the reconstruction.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Reconstruct { config, output } => {
            println!("Lucida Hologram Reconstruction");
            println!("==============================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let out_dir = output.unwrap_or_else(|| job.output.directory.clone());
            let written = runner::run_job(&job, &out_dir)?;

            println!("Reconstruction complete: {}", written.display());
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
    }
}
