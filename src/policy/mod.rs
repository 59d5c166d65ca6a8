pub mod config;
pub mod checker;

// Re-export main types
pub use config::LicensePolicy;
pub use checker::{PolicyFailure, Violation, ViolationKind};
