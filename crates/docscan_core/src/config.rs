//! Consumption policy.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::ScanError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/policy.json");
static POLICY_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// File names searched by [`ConsumptionPolicy::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".docscan.jsonc", ".docscan.json"];

/// How symbols, field names and annotations reach the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SymbolRepresentation {
    /// The interned token.
    Token,
    /// The resolved text.
    #[default]
    String,
}

/// How decimals reach the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecimalRepresentation {
    /// Arbitrary precision, negative zero preserved.
    #[default]
    Exact,
    /// `rust_decimal::Decimal`.
    Native,
}

/// How clob and blob payloads are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LargeObjectStrategy {
    /// One read into a new buffer.
    #[default]
    Whole,
    /// Fixed-size reads into one reusable buffer.
    Chunked,
}

/// What a read produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadMode {
    /// Visit values without retaining them.
    #[default]
    Traverse,
    /// Materialize the whole document.
    Dom,
}

/// Where the cursor reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    #[default]
    Buffer,
    Stream,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReaderKind {
    #[default]
    Incremental,
    NonIncremental,
}

/// Re-encoding applied to the input before it is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputFormat {
    /// Read the input as is.
    #[default]
    Json,
    CompactJson,
    PrettyJson,
}

/// Which read task implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    #[default]
    Cursor,
    Element,
}

/// Policy for consuming one document. Immutable for the duration of a read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionPolicy {
    #[serde(default)]
    pub symbols: SymbolRepresentation,

    #[serde(default)]
    pub decimals: DecimalRepresentation,

    #[serde(default)]
    pub large_objects: LargeObjectStrategy,

    /// Search paths. Presence selects path-filtered traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,

    /// Explicit initial window size for incremental readers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_window_size: Option<usize>,

    #[serde(default)]
    pub mode: ReadMode,

    #[serde(default)]
    pub source: SourceKind,

    #[serde(default)]
    pub reader: ReaderKind,

    #[serde(default)]
    pub format: InputFormat,

    #[serde(default)]
    pub task: TaskKind,
}

impl ConsumptionPolicy {
    /// Creates a policy with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a policy from a `.json` or `.jsonc` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScanError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_jsonc(&content)
    }

    /// Parses a policy from JSON with comments.
    pub fn from_jsonc(content: &str) -> Result<Self, ScanError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| ScanError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));
        Self::from_value(value)
    }

    /// Parses a policy from a JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, ScanError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ScanError::config(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> Result<Self, ScanError> {
        let schema = POLICY_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded policy schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid policy schema compilation: {}", e))
            })
            .as_ref()
            .map_err(ScanError::config)?;

        if let Err(e) = schema.validate(&value) {
            return Err(ScanError::config(format!(
                "Policy validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| ScanError::config(format!("Invalid policy: {}", e)))
    }

    /// Finds the first policy file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Returns true if search paths are configured.
    pub fn has_paths(&self) -> bool {
        self.paths.is_some()
    }
}
