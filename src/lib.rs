pub mod config;
pub mod error;
pub mod license;
pub mod lockfile;
pub mod logging;
pub mod output;
pub mod policy;
pub mod report;

// Re-export main types for easy access
pub use config::{load_config, Config};
pub use error::ScanError;
pub use license::{resolve_licenses, Occurrence, ResolvedDependency};
pub use lockfile::{Lockfile, PackageEntry, PackageLockParser};
pub use policy::{LicensePolicy, PolicyFailure, Violation, ViolationKind};
pub use report::{assemble, LicenseRecord};
