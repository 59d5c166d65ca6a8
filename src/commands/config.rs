use anyhow::Result;
use std::path::PathBuf;

use license_scan::config::load_config;

pub fn handle_config(
    path: Option<PathBuf>,
    config_file: Option<PathBuf>,
    show: bool,
    validate: bool,
    quiet: bool,
) -> Result<()> {
    if !show && !validate {
        if !quiet {
            eprintln!("Use --show or --validate");
        }
        std::process::exit(1);
    }

    let root = super::project_root(path)?;

    match load_config(&root, config_file.as_deref()) {
        Ok(config) => {
            if show && !quiet {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            if validate && !quiet {
                println!("✅ Configuration is valid");
            }
        }
        Err(e) => {
            if !quiet {
                eprintln!("❌ Configuration validation failed: {}", e);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
