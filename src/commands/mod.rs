pub mod check;
pub mod config;

use anyhow::Result;
use std::path::PathBuf;

pub use check::handle_check;
pub use config::handle_config;

/// Project root from the optional positional path.
fn project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}
