use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "license-scan")]
#[command(about = "Audit the licenses of every package installed from package-lock.json")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every dependency's license, write the CSV report and apply the policy
    Check {
        /// Project directory containing package-lock.json and node_modules (default: current directory)
        path: Option<PathBuf>,

        /// Report file (default: license-scan.csv, or `output` from .licenserc)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read configuration from this file on top of the .licenserc files
        #[arg(long)]
        config: Option<PathBuf>,

        /// Exit with code 0 even on violations
        #[arg(long)]
        exit_zero: bool,
    },
    /// Show or validate configuration
    Config {
        /// Project directory (default: current directory)
        path: Option<PathBuf>,

        /// Read configuration from this file on top of the .licenserc files
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}
