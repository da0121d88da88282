//! Integration tests for CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DOCUMENT: &str = r#"{"a": 1, "b": [2, 3], "c": "x"}"#;

/// Helper to create a command for the docscan CLI
fn docscan_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docscan"))
}

/// Writes `content` to `name` inside `dir`.
fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Runs `scan --format json` and returns the parsed report.
fn scan_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = docscan_cmd()
        .current_dir(dir)
        .arg("scan")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        docscan_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn scan_help_notes_json_input_limits() {
        docscan_cmd()
            .args(["scan", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("JSON input never contains decimals"))
            .stdout(predicate::str::contains("JSON input never contains them"));
    }

    #[test]
    fn shows_version_with_flag() {
        docscan_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod init_command {
    use super::*;

    #[test]
    fn creates_new_config_file() {
        let temp_dir = TempDir::new().unwrap();

        docscan_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .success()
            .stderr(predicate::str::contains("Created .docscan.jsonc"));

        let content = fs::read_to_string(temp_dir.path().join(".docscan.jsonc")).unwrap();
        assert!(content.contains("symbols"));
        assert!(content.contains("largeObjects"));
    }

    #[test]
    fn fails_when_config_exists_without_force() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), ".docscan.jsonc", "{}");

        docscan_cmd()
            .current_dir(temp_dir.path())
            .arg("init")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn overwrites_config_with_force() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_file(temp_dir.path(), ".docscan.jsonc", r#"{"custom": 1}"#);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["init", "--force"])
            .assert()
            .success();

        let content = fs::read_to_string(config_path).unwrap();
        assert!(!content.contains("custom"));
        assert!(content.contains("symbols"));
    }
}

mod scan_command {
    use super::*;

    #[test]
    fn reports_value_count_as_text() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "doc.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("values: 7"))
            .stdout(predicate::str::contains("digest: "));
    }

    #[test]
    fn reports_json() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        let report = scan_json(temp_dir.path(), &["doc.json"]);

        assert_eq!(report["values"], 7);
        assert_eq!(report["path"], "doc.json");
        assert_eq!(report["digest"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn buffer_and_stream_agree() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        let buffer = scan_json(temp_dir.path(), &["doc.json", "--source", "buffer"]);
        let stream = scan_json(
            temp_dir.path(),
            &["doc.json", "--source", "stream", "--initial-window-size", "16"],
        );

        assert_eq!(buffer["digest"], stream["digest"]);
    }

    #[test]
    fn scans_search_paths() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            "doc.json",
            r#"{"items": [{"v": 1}, {"v": 2}, {"v": 3}], "other": 4}"#,
        );

        let report = scan_json(temp_dir.path(), &["doc.json", "--path", "items.v"]);

        // A field name and a value per match.
        assert_eq!(report["values"], 6);
    }

    #[test]
    fn dom_mode_delivers_one_document() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        let report = scan_json(temp_dir.path(), &["doc.json", "--mode", "dom"]);

        assert_eq!(report["values"], 1);
    }

    #[test]
    fn uses_discovered_config() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);
        write_file(
            temp_dir.path(),
            ".docscan.jsonc",
            r#"{
  // only the list
  "paths": ["b"]
}"#,
        );

        let report = scan_json(temp_dir.path(), &["doc.json"]);

        assert_eq!(report["values"], 3);
    }

    #[test]
    fn uses_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);
        write_file(temp_dir.path(), "policy.json", r#"{"mode": "dom"}"#);

        let report = scan_json(temp_dir.path(), &["doc.json", "--config", "policy.json"]);

        assert_eq!(report["values"], 1);
    }

    #[test]
    fn rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);
        write_file(temp_dir.path(), ".docscan.json", r#"{"symbols": "bogus"}"#);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "doc.json"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Policy validation failed"));
    }

    #[test]
    fn fails_on_unsupported_operation() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "doc.json", "--task", "element"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Unsupported operation"));
    }

    #[test]
    fn fails_on_malformed_document() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", r#"{"a": [1, 2"#);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "doc.json"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Malformed document"));
    }

    #[test]
    fn fails_on_malformed_path() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", DOCUMENT);

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "doc.json", "--path", "a..b"])
            .assert()
            .code(2);
    }

    #[test]
    fn fails_on_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["scan", "missing.json"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("missing.json"));
    }
}

mod dump_command {
    use super::*;

    #[test]
    fn prints_materialized_document() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "doc.json", r#"{"a": [1, "x"]} true"#);

        let output = docscan_cmd()
            .current_dir(temp_dir.path())
            .args(["dump", "doc.json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let dumped: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            dumped,
            serde_json::json!([
                {
                    "type": "struct",
                    "value": [{
                        "type": "list",
                        "fieldName": "a",
                        "value": [
                            { "type": "int", "value": 1 },
                            { "type": "string", "value": "x" }
                        ]
                    }]
                },
                { "type": "bool", "value": true }
            ])
        );
    }
}
