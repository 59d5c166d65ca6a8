use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{handle_check, handle_config};
use license_scan::logging::{init_tracing, level_for};
use license_scan::ScanError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(level_for(cli.verbose, cli.quiet)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Check {
            path,
            output,
            config,
            exit_zero,
        } => handle_check(path, output, config, exit_zero, cli.quiet),
        Commands::Config {
            path,
            config,
            show,
            validate,
        } => handle_config(path, config, show, validate, cli.quiet),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        if let Some(hint) = err.downcast_ref::<ScanError>().and_then(ScanError::hint) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}
