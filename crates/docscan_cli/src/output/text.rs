//! Text output formatter

use std::path::Path;

use docscan_core::SinkReport;

pub fn output_text(path: &Path, report: &SinkReport) {
    println!("{}:", path.display());
    println!("  values: {}", report.values);
    println!("  digest: {}", report.digest);
}
