//! Dump command implementation

use std::path::Path;

use docscan_core::{ReadMode, Recorded, RecordingSink, TaskSetup, new_task};
use miette::{IntoDiagnostic, Result};

use crate::commands::load_policy;

pub fn run_dump(config: Option<&Path>, file: &Path) -> Result<()> {
    let mut policy = load_policy(config)?;
    policy.mode = ReadMode::Dom;

    let setup = TaskSetup::from_file(policy, file).into_diagnostic()?;
    let mut sink = RecordingSink::new();
    new_task(setup).run(&mut sink).into_diagnostic()?;

    let document: Vec<serde_json::Value> = sink
        .into_values()
        .into_iter()
        .flat_map(|value| match value {
            Recorded::Document(elements) => elements,
            _ => Vec::new(),
        })
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&document).into_diagnostic()?
    );
    Ok(())
}
