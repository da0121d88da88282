//! Init command implementation

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use docscan_core::CONFIG_FILES;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_POLICY: &str = r#"{
  // "token" or "string"
  "symbols": "string",
  // "exact" or "native"
  "decimals": "exact",
  // "whole" or "chunked"
  "largeObjects": "whole",
  // "traverse" or "dom"
  "mode": "traverse",
  // "buffer" or "stream"
  "source": "buffer",
  // "incremental" or "nonIncremental"
  "reader": "incremental",
  // "json", "compactJson" or "prettyJson"
  "format": "json",
  // "cursor" or "element"
  "task": "cursor"
  // "paths": ["items.v"],
  // "initialWindowSize": 4096
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILES[0]);

    loop {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        match options.open(&config_path) {
            Ok(mut file) => {
                file.write_all(DEFAULT_POLICY.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
