//! Element definition.
//!
//! The node type of a materialized document and of in-memory input forests.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq};

use crate::{Decimal, Int, SymbolToken, ValueType};

/// Timestamp with the offset it was written with.
pub type Timestamp = DateTime<FixedOffset>;

/// A node of a document.
///
/// Elements are allocated in an [`ElementArena`](crate::ElementArena) and are
/// `Copy`; containers refer to their children through arena slices.
///
/// # Example
///
/// ```rust
/// use docscan_element::{Element, ElementArena, SymbolToken};
///
/// let arena = ElementArena::new();
///
/// let items = arena.alloc_slice_copy(&[Element::int(2), Element::int(3)]);
/// let fields = arena.alloc_slice_copy(&[
///     Element::int(1).with_field_name(SymbolToken::from_text("a")),
///     Element::list(items).with_field_name(SymbolToken::from_text("b")),
/// ]);
/// let root = Element::structure(fields);
///
/// assert_eq!(root.children()[1].children().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element<'a> {
    /// Field name, present only when the parent is a struct.
    pub field_name: Option<SymbolToken<'a>>,

    /// Annotations in document order.
    pub annotations: &'a [SymbolToken<'a>],

    /// The typed value.
    pub value: ElementValue<'a>,
}

/// Typed payload of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementValue<'a> {
    /// A null of the given declared type.
    Null(ValueType),
    Bool(bool),
    Int(Int<'a>),
    Float(f64),
    Decimal(Decimal<'a>),
    Timestamp(Timestamp),
    Symbol(SymbolToken<'a>),
    String(&'a str),
    Clob(&'a [u8]),
    Blob(&'a [u8]),
    List(&'a [Element<'a>]),
    SExp(&'a [Element<'a>]),
    Struct(&'a [Element<'a>]),
}

impl<'a> Element<'a> {
    /// Creates an element with no field name and no annotations.
    #[inline]
    pub const fn new(value: ElementValue<'a>) -> Self {
        Self {
            field_name: None,
            annotations: &[],
            value,
        }
    }

    pub const fn null(value_type: ValueType) -> Self {
        Self::new(ElementValue::Null(value_type))
    }

    pub const fn bool(value: bool) -> Self {
        Self::new(ElementValue::Bool(value))
    }

    pub const fn int(value: i64) -> Self {
        Self::new(ElementValue::Int(Int::I64(value)))
    }

    pub const fn float(value: f64) -> Self {
        Self::new(ElementValue::Float(value))
    }

    pub const fn decimal(value: Decimal<'a>) -> Self {
        Self::new(ElementValue::Decimal(value))
    }

    pub const fn timestamp(value: Timestamp) -> Self {
        Self::new(ElementValue::Timestamp(value))
    }

    pub const fn symbol(value: SymbolToken<'a>) -> Self {
        Self::new(ElementValue::Symbol(value))
    }

    pub const fn string(value: &'a str) -> Self {
        Self::new(ElementValue::String(value))
    }

    pub const fn clob(value: &'a [u8]) -> Self {
        Self::new(ElementValue::Clob(value))
    }

    pub const fn blob(value: &'a [u8]) -> Self {
        Self::new(ElementValue::Blob(value))
    }

    pub const fn list(children: &'a [Element<'a>]) -> Self {
        Self::new(ElementValue::List(children))
    }

    pub const fn sexp(children: &'a [Element<'a>]) -> Self {
        Self::new(ElementValue::SExp(children))
    }

    /// Creates a struct. Children are expected to carry field names.
    pub const fn structure(children: &'a [Element<'a>]) -> Self {
        Self::new(ElementValue::Struct(children))
    }

    /// Returns this element with the given field name.
    #[inline]
    pub const fn with_field_name(mut self, name: SymbolToken<'a>) -> Self {
        self.field_name = Some(name);
        self
    }

    /// Returns this element with the given annotations.
    #[inline]
    pub const fn with_annotations(mut self, annotations: &'a [SymbolToken<'a>]) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns the declared type (also for typed nulls).
    pub const fn value_type(&self) -> ValueType {
        match self.value {
            ElementValue::Null(value_type) => value_type,
            ElementValue::Bool(_) => ValueType::Bool,
            ElementValue::Int(_) => ValueType::Int,
            ElementValue::Float(_) => ValueType::Float,
            ElementValue::Decimal(_) => ValueType::Decimal,
            ElementValue::Timestamp(_) => ValueType::Timestamp,
            ElementValue::Symbol(_) => ValueType::Symbol,
            ElementValue::String(_) => ValueType::String,
            ElementValue::Clob(_) => ValueType::Clob,
            ElementValue::Blob(_) => ValueType::Blob,
            ElementValue::List(_) => ValueType::List,
            ElementValue::SExp(_) => ValueType::SExp,
            ElementValue::Struct(_) => ValueType::Struct,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self.value, ElementValue::Null(_))
    }

    /// Returns the children of a container, or an empty slice.
    pub const fn children(&self) -> &'a [Element<'a>] {
        match self.value {
            ElementValue::List(children)
            | ElementValue::SExp(children)
            | ElementValue::Struct(children) => children,
            _ => &[],
        }
    }

    /// Returns the payload of a clob or blob.
    pub const fn lob_bytes(&self) -> Option<&'a [u8]> {
        match self.value {
            ElementValue::Clob(bytes) | ElementValue::Blob(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the first child whose field name has the given text.
    pub fn field(&self, name: &str) -> Option<&'a Element<'a>> {
        self.children()
            .iter()
            .find(|child| child.field_name.and_then(|token| token.text) == Some(name))
    }
}

impl Serialize for SymbolToken<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct Bytes<'a>(&'a [u8]);

impl Serialize for Bytes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for byte in self.0 {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }
}

impl<'a> Serialize for Element<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut len = 2; // type, value
        if self.field_name.is_some() {
            len += 1;
        }
        if !self.annotations.is_empty() {
            len += 1;
        }

        let mut state = serializer.serialize_map(Some(len))?;

        state.serialize_entry("type", &self.value_type())?;
        if let Some(name) = &self.field_name {
            state.serialize_entry("fieldName", name)?;
        }
        if !self.annotations.is_empty() {
            state.serialize_entry("annotations", self.annotations)?;
        }

        match &self.value {
            ElementValue::Null(_) => state.serialize_entry("value", &())?,
            ElementValue::Bool(v) => state.serialize_entry("value", v)?,
            ElementValue::Int(Int::I64(v)) => state.serialize_entry("value", v)?,
            ElementValue::Int(big) => state.serialize_entry("value", &big.to_string())?,
            ElementValue::Float(v) => state.serialize_entry("value", v)?,
            ElementValue::Decimal(v) => state.serialize_entry("value", &v.to_string())?,
            ElementValue::Timestamp(v) => state.serialize_entry("value", &v.to_rfc3339())?,
            ElementValue::Symbol(v) => state.serialize_entry("value", v)?,
            ElementValue::String(v) => state.serialize_entry("value", v)?,
            ElementValue::Clob(v) | ElementValue::Blob(v) => {
                state.serialize_entry("value", &Bytes(v))?
            }
            ElementValue::List(children)
            | ElementValue::SExp(children)
            | ElementValue::Struct(children) => state.serialize_entry("value", children)?,
        }

        state.end()
    }
}
