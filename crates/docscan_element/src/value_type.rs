//! Value type definitions.

use serde::{Deserialize, Serialize};

/// Type tag of a document node.
///
/// A node keeps its type even when it is null: a typed null such as
/// `null.string` reports [`ValueType::String`] and is flagged as null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ValueType {
    /// Untyped null.
    Null,
    /// Boolean.
    Bool,
    /// Integer of arbitrary size.
    Int,
    /// Binary floating point.
    Float,
    /// Exact decimal.
    Decimal,
    /// Point in time with offset.
    Timestamp,
    /// Interned symbolic name.
    Symbol,
    /// Unicode text.
    String,
    /// Large character object.
    Clob,
    /// Large binary object.
    Blob,
    /// Ordered sequence.
    List,
    /// S-expression sequence.
    SExp,
    /// Keyed structure.
    Struct,
}

impl ValueType {
    /// Returns true if nodes of this type own child nodes.
    #[inline]
    pub const fn is_container(&self) -> bool {
        matches!(self, ValueType::List | ValueType::SExp | ValueType::Struct)
    }

    /// Returns true for the ordered sequence types (list and sexp).
    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, ValueType::List | ValueType::SExp)
    }

    /// Returns true for large objects, whose payload can be read in chunks.
    #[inline]
    pub const fn is_lob(&self) -> bool {
        matches!(self, ValueType::Clob | ValueType::Blob)
    }

    /// Returns the lowercase name of this type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Decimal => "decimal",
            ValueType::Timestamp => "timestamp",
            ValueType::Symbol => "symbol",
            ValueType::String => "string",
            ValueType::Clob => "clob",
            ValueType::Blob => "blob",
            ValueType::List => "list",
            ValueType::SExp => "sexp",
            ValueType::Struct => "struct",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_container() {
        assert!(ValueType::List.is_container());
        assert!(ValueType::SExp.is_container());
        assert!(ValueType::Struct.is_container());
        assert!(!ValueType::String.is_container());
        assert!(!ValueType::Blob.is_container());
    }

    #[test]
    fn test_is_sequence() {
        assert!(ValueType::List.is_sequence());
        assert!(ValueType::SExp.is_sequence());
        assert!(!ValueType::Struct.is_sequence());
    }

    #[test]
    fn test_is_lob() {
        assert!(ValueType::Blob.is_lob());
        assert!(ValueType::Clob.is_lob());
        assert!(!ValueType::String.is_lob());
    }

    #[test]
    fn test_display_matches_serde() {
        let json = serde_json::to_string(&ValueType::SExp).unwrap();
        assert_eq!(json, format!("\"{}\"", ValueType::SExp));
    }
}
