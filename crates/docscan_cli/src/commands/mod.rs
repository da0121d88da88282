//! Subcommand implementations

mod dump;
mod init;
mod scan;

pub use dump::run_dump;
pub use init::run_init;
pub use scan::run_scan;

use std::path::Path;

use docscan_core::ConsumptionPolicy;
use miette::{IntoDiagnostic, Result};
use tracing::info;

/// Loads the policy from `--config`, a discovered policy file or defaults.
pub fn load_policy(config: Option<&Path>) -> Result<ConsumptionPolicy> {
    if let Some(path) = config {
        return ConsumptionPolicy::from_file(path).into_diagnostic();
    }

    if let Some(path) = ConsumptionPolicy::discover(".") {
        info!("Using config: {}", path.display());
        return ConsumptionPolicy::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(ConsumptionPolicy::new())
}
