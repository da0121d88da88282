//! Value sinks.
//!
//! Every value the engines decode is handed to a [`ValueSink`], so no decode
//! step can be skipped as dead code.

use std::ops::ControlFlow;

use docscan_element::visitor::{VisitResult, Visitor, walk_tree};
use docscan_element::{Decimal, Element, ElementValue, Int, SymbolToken, Timestamp};
use num_bigint::BigInt;
use serde::Serialize;

/// A decoded value on its way to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'v> {
    Bool(bool),
    I32(i32),
    I64(i64),
    BigInt(BigInt),
    F64(f64),
    /// Exact decimal.
    Decimal(Decimal<'v>),
    NativeDecimal(rust_decimal::Decimal),
    Timestamp(Timestamp),
    /// A symbol, field name or annotation in token form.
    Symbol(SymbolToken<'v>),
    /// All annotations of one node in token form.
    Symbols(&'v [SymbolToken<'v>]),
    /// Text, including resolved symbols, field names and annotations.
    Str(&'v str),
    /// A whole large object payload.
    Bytes(&'v [u8]),
    /// Marker delivered once per chunk-read large object.
    Byte(u8),
    /// A materialized document.
    Document(&'v [Element<'v>]),
}

/// Observer receiving every decoded value.
pub trait ValueSink {
    fn consume(&mut self, value: Value<'_>);
}

impl<S: ValueSink + ?Sized> ValueSink for &mut S {
    fn consume(&mut self, value: Value<'_>) {
        (**self).consume(value);
    }
}

/// Summary of a [`ChecksumSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkReport {
    /// Number of values consumed.
    pub values: u64,
    /// Hex blake3 digest over every consumed value.
    pub digest: String,
}

/// Counts values and folds them into a blake3 digest.
#[derive(Debug, Clone, Default)]
pub struct ChecksumSink {
    values: u64,
    hasher: blake3::Hasher,
}

impl ChecksumSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> u64 {
        self.values
    }

    pub fn report(&self) -> SinkReport {
        SinkReport {
            values: self.values,
            digest: self.hasher.finalize().to_hex().to_string(),
        }
    }
}

impl ValueSink for ChecksumSink {
    fn consume(&mut self, value: Value<'_>) {
        self.values += 1;
        let hasher = &mut self.hasher;
        match value {
            Value::Bool(v) => tagged(hasher, b'b', &[u8::from(v)]),
            Value::I32(v) => tagged(hasher, b'i', &v.to_le_bytes()),
            Value::I64(v) => tagged(hasher, b'l', &v.to_le_bytes()),
            Value::BigInt(v) => tagged(hasher, b'I', &v.to_signed_bytes_le()),
            Value::F64(v) => tagged(hasher, b'f', &v.to_bits().to_le_bytes()),
            Value::Decimal(v) => tagged(hasher, b'd', v.to_string().as_bytes()),
            Value::NativeDecimal(v) => tagged(hasher, b'n', &v.serialize()),
            Value::Timestamp(v) => tagged(hasher, b't', v.to_rfc3339().as_bytes()),
            Value::Symbol(v) => symbol(hasher, v),
            Value::Symbols(tokens) => {
                tagged(hasher, b'[', &(tokens.len() as u64).to_le_bytes());
                for token in tokens {
                    symbol(hasher, *token);
                }
            }
            Value::Str(v) => tagged(hasher, b's', v.as_bytes()),
            Value::Bytes(v) => tagged(hasher, b'B', v),
            Value::Byte(v) => tagged(hasher, b'x', &[v]),
            Value::Document(elements) => {
                let mut digest = DigestVisitor { hasher };
                for element in elements {
                    let _ = walk_tree(&mut digest, element);
                }
            }
        }
    }
}

fn tagged(hasher: &mut blake3::Hasher, tag: u8, payload: &[u8]) {
    hasher.update(&[tag]);
    hasher.update(&(payload.len() as u64).to_le_bytes());
    hasher.update(payload);
}

fn symbol(hasher: &mut blake3::Hasher, token: SymbolToken<'_>) {
    match token.text {
        Some(text) => tagged(hasher, b'y', text.as_bytes()),
        None => tagged(hasher, b'Y', &(token.sid.unwrap_or(0) as u64).to_le_bytes()),
    }
}

/// Folds a materialized tree into a digest.
struct DigestVisitor<'h> {
    hasher: &'h mut blake3::Hasher,
}

impl<'a> Visitor<'a> for DigestVisitor<'_> {
    fn enter_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        tagged(self.hasher, b'e', element.value_type().as_str().as_bytes());
        if let Some(name) = element.field_name {
            symbol(self.hasher, name);
        }
        for annotation in element.annotations {
            symbol(self.hasher, *annotation);
        }
        ControlFlow::Continue(())
    }

    fn visit_scalar(&mut self, element: &'a Element<'a>) -> VisitResult {
        let hasher = &mut *self.hasher;
        match element.value {
            ElementValue::Null(_) => tagged(hasher, b'0', &[]),
            ElementValue::Bool(v) => tagged(hasher, b'b', &[u8::from(v)]),
            ElementValue::Int(Int::I64(v)) => tagged(hasher, b'l', &v.to_le_bytes()),
            ElementValue::Int(v) => tagged(hasher, b'I', &v.to_bigint().to_signed_bytes_le()),
            ElementValue::Float(v) => tagged(hasher, b'f', &v.to_bits().to_le_bytes()),
            ElementValue::Decimal(v) => tagged(hasher, b'd', v.to_string().as_bytes()),
            ElementValue::Timestamp(v) => tagged(hasher, b't', v.to_rfc3339().as_bytes()),
            ElementValue::Symbol(v) => symbol(hasher, v),
            ElementValue::String(v) => tagged(hasher, b's', v.as_bytes()),
            ElementValue::Clob(v) | ElementValue::Blob(v) => tagged(hasher, b'B', v),
            ElementValue::List(_) | ElementValue::SExp(_) | ElementValue::Struct(_) => {}
        }
        ControlFlow::Continue(())
    }
}

/// An owned copy of a consumed [`Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Bool(bool),
    I32(i32),
    I64(i64),
    BigInt(BigInt),
    F64(f64),
    /// Exact decimal in `<coefficient>d<exponent>` form.
    Decimal(String),
    NativeDecimal(rust_decimal::Decimal),
    Timestamp(Timestamp),
    /// Token form, `$<sid>` when the text is unknown.
    Symbol(String),
    Symbols(Vec<String>),
    Str(String),
    Bytes(Vec<u8>),
    Byte(u8),
    /// Each top-level element serialized to JSON.
    Document(Vec<serde_json::Value>),
}

impl From<Value<'_>> for Recorded {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::Bool(v) => Recorded::Bool(v),
            Value::I32(v) => Recorded::I32(v),
            Value::I64(v) => Recorded::I64(v),
            Value::BigInt(v) => Recorded::BigInt(v),
            Value::F64(v) => Recorded::F64(v),
            Value::Decimal(v) => Recorded::Decimal(v.to_string()),
            Value::NativeDecimal(v) => Recorded::NativeDecimal(v),
            Value::Timestamp(v) => Recorded::Timestamp(v),
            Value::Symbol(v) => Recorded::Symbol(v.to_string()),
            Value::Symbols(tokens) => {
                Recorded::Symbols(tokens.iter().map(ToString::to_string).collect())
            }
            Value::Str(v) => Recorded::Str(v.to_string()),
            Value::Bytes(v) => Recorded::Bytes(v.to_vec()),
            Value::Byte(v) => Recorded::Byte(v),
            Value::Document(elements) => Recorded::Document(
                elements
                    .iter()
                    .map(|element| serde_json::to_value(element).unwrap_or_default())
                    .collect(),
            ),
        }
    }
}

/// Keeps an owned log of every consumed value.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    values: Vec<Recorded>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[Recorded] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Recorded> {
        self.values
    }
}

impl ValueSink for RecordingSink {
    fn consume(&mut self, value: Value<'_>) {
        self.values.push(value.into());
    }
}
