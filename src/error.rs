//! Error types for license scanning.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot find package-lock.json at {}", .path.display())]
    LockfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse package-lock.json at {}", .path.display())]
    LockfileParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot read file {}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse manifest {}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read configuration file {}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {} as JSON, TOML or INI: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to write report {}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report row")]
    Csv(#[from] csv::Error),
}

impl ScanError {
    /// Follow-up advice printed under the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ScanError::LockfileRead { .. } | ScanError::LockfileParse { .. } => {
                Some("Please install dependencies using the latest version of npm")
            }
            ScanError::ManifestRead { .. } => {
                Some("Please run \"npm ci\" to ensure that all dependencies are installed")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
