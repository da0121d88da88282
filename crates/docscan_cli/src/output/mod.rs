//! Output formatting module

mod json;
mod text;

use std::path::Path;

use docscan_core::SinkReport;
use miette::Result;

use crate::cli::OutputFormat;

pub fn output_report(path: &Path, report: &SinkReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => json::output_json(path, report)?,
        OutputFormat::Text => text::output_text(path, report),
    }
    Ok(())
}
