//! Scan command implementation

use std::path::Path;

use docscan_core::{ChecksumSink, TaskSetup, new_task};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use crate::cli::ScanArgs;
use crate::commands::load_policy;
use crate::output::output_report;

pub fn run_scan(config: Option<&Path>, args: &ScanArgs) -> Result<()> {
    let mut policy = load_policy(config)?;
    args.apply(&mut policy);
    debug!("Effective policy: {:?}", policy);

    let setup = TaskSetup::from_file(policy, &args.file).into_diagnostic()?;
    let task = new_task(setup);

    let mut sink = ChecksumSink::new();
    task.run(&mut sink).into_diagnostic()?;

    output_report(&args.file, &sink.report(), args.format)
}
