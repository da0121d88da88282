//! JSON output formatter

use std::path::Path;

use docscan_core::SinkReport;
use miette::{IntoDiagnostic, Result};

pub fn output_json(path: &Path, report: &SinkReport) -> Result<()> {
    let output = serde_json::json!({
        "path": path.display().to_string(),
        "values": report.values,
        "digest": report.digest,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
