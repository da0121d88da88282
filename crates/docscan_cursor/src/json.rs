//! JSON top-level source.
//!
//! Decodes JSON text with `serde_json`, one top-level value at a time, and
//! converts each value into arena elements when the cursor reaches it.

use docscan_element::{Element, ElementArena, ElementValue, SymbolToken, ValueType};
use num_bigint::BigInt;
use serde_json::de::{Read, StreamDeserializer};
use serde_json::{Deserializer, Value};

use crate::{CursorError, TopLevelSource};

/// Top-level values decoded from JSON text.
///
/// Field order follows the document. Integers outside the `i64` range become
/// big integers with every digit kept; numbers with a fraction or exponent
/// become floats.
pub struct JsonSource<'a, R: Read<'a>> {
    arena: &'a ElementArena,
    stream: StreamDeserializer<'a, R, Value>,
}

impl<'a, R: Read<'a>> JsonSource<'a, R> {
    pub fn new(arena: &'a ElementArena, read: R) -> Self {
        Self {
            arena,
            stream: Deserializer::new(read).into_iter(),
        }
    }

    fn convert(&self, value: Value) -> Element<'a> {
        let arena = self.arena;
        match value {
            Value::Null => Element::null(ValueType::Null),
            Value::Bool(b) => Element::bool(b),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Element::int(v)
                } else if let Some(v) = big_int(&n.to_string()) {
                    Element::new(ElementValue::Int(arena.alloc_big_int(&v)))
                } else {
                    Element::float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Element::string(arena.alloc_str(&s)),
            Value::Array(items) => {
                let children: Vec<Element<'a>> =
                    items.into_iter().map(|item| self.convert(item)).collect();
                Element::list(arena.alloc_slice_copy(&children))
            }
            Value::Object(map) => {
                let children: Vec<Element<'a>> = map
                    .into_iter()
                    .map(|(name, item)| {
                        self.convert(item)
                            .with_field_name(SymbolToken::from_text(arena.alloc_str(&name)))
                    })
                    .collect();
                Element::structure(arena.alloc_slice_copy(&children))
            }
        }
    }
}

/// Parses number text written without a fraction or exponent.
fn big_int(text: &str) -> Option<BigInt> {
    if text.contains(['.', 'e', 'E']) {
        return None;
    }
    text.parse().ok()
}

impl<'a, R: Read<'a>> TopLevelSource<'a> for JsonSource<'a, R> {
    fn next_value(&mut self) -> Result<Option<&'a Element<'a>>, CursorError> {
        match self.stream.next() {
            None => Ok(None),
            Some(Ok(value)) => {
                let element = self.convert(value);
                Ok(Some(self.arena.alloc(element)))
            }
            Some(Err(e)) if e.is_io() => Err(CursorError::Io(e.into())),
            Some(Err(e)) => Err(CursorError::malformed_at(
                e.to_string(),
                self.stream.byte_offset(),
            )),
        }
    }
}

impl<'a, R: Read<'a>> std::fmt::Debug for JsonSource<'a, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSource")
            .field("byte_offset", &self.stream.byte_offset())
            .finish()
    }
}
