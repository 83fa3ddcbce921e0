// ww3rs/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use ww3rs::cli::{check_bundle, render_bundle, write_bundle};
use ww3rs::constants::DEFAULT_CONFIG_NAME;

#[derive(Parser)]
#[command(name = "ww3rs")]
#[command(about = "Namelist generator for WAVEWATCH III runs", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Bundle file (defaults to ww3rs.yml in the current directory)
    #[arg(short, long, value_name = "FILE", global = true, env = "WW3RS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every completeness and consistency finding
    Check {
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every control file to stdout
    Render,
    /// Write every control file
    Write {
        /// Output directory (overrides the bundle's output_dir)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));

    match cli.command {
        Commands::Check { json } => check_bundle(&config, json),
        Commands::Render => render_bundle(&config),
        Commands::Write { output_dir } => write_bundle(&config, output_dir.as_deref()),
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
