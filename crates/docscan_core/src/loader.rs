//! Document builder.
//!
//! Materializes everything a cursor yields into an immutable element tree.

use docscan_cursor::{Cursor, CursorError};
use docscan_element::{Decimal, Element, ElementArena, ElementValue, Int, SymbolToken, ValueType};

use crate::ScanError;

/// A container whose children are still being read.
struct Pending<'t> {
    shell: Element<'t>,
    children: Vec<Element<'t>>,
}

/// Copies documents into an arena.
pub struct ElementLoader<'t> {
    arena: &'t ElementArena,
}

impl<'t> ElementLoader<'t> {
    pub fn new(arena: &'t ElementArena) -> Self {
        Self { arena }
    }

    /// Reads every remaining top-level value and returns them in order.
    ///
    /// Containers are tracked on an explicit stack, so document depth does not
    /// grow the call stack.
    pub fn load_all<'a, C>(&self, cursor: &mut C) -> Result<&'t [Element<'t>], ScanError>
    where
        C: Cursor<'a>,
    {
        let mut top = Vec::new();
        let mut stack: Vec<Pending<'t>> = Vec::new();

        loop {
            if cursor.next()?.is_some() {
                let element = self.copy_node(cursor)?;
                if !element.is_null() && element.value_type().is_container() {
                    cursor.step_in()?;
                    stack.push(Pending {
                        shell: element,
                        children: Vec::new(),
                    });
                    continue;
                }
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => top.push(element),
                }
            } else {
                let Some(done) = stack.pop() else {
                    break;
                };
                cursor.step_out()?;
                let element = self.close(done);
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => top.push(element),
                }
            }
        }

        Ok(self.arena.alloc_slice_copy(&top))
    }

    fn close(&self, pending: Pending<'t>) -> Element<'t> {
        let children = self.arena.alloc_slice_copy(&pending.children);
        let value = match pending.shell.value {
            ElementValue::SExp(_) => ElementValue::SExp(children),
            ElementValue::Struct(_) => ElementValue::Struct(children),
            _ => ElementValue::List(children),
        };
        Element {
            value,
            ..pending.shell
        }
    }

    /// Copies the current node. Containers come back empty.
    fn copy_node<'a, C>(&self, cursor: &mut C) -> Result<Element<'t>, ScanError>
    where
        C: Cursor<'a>,
    {
        let Some(value_type) = cursor.value_type() else {
            return Err(CursorError::invalid_state("cursor is not positioned on a value").into());
        };

        let value = if cursor.is_null() {
            ElementValue::Null(value_type)
        } else {
            match value_type {
                ValueType::Null => ElementValue::Null(ValueType::Null),
                ValueType::Bool => ElementValue::Bool(cursor.bool_value()?),
                ValueType::Int => ElementValue::Int(self.copy_int(cursor.int_value()?)),
                ValueType::Float => ElementValue::Float(cursor.f64_value()?),
                ValueType::Decimal => {
                    ElementValue::Decimal(self.copy_decimal(cursor.decimal_value()?))
                }
                ValueType::Timestamp => ElementValue::Timestamp(cursor.timestamp_value()?),
                ValueType::Symbol => ElementValue::Symbol(self.copy_token(cursor.symbol_value()?)),
                ValueType::String => {
                    ElementValue::String(self.arena.alloc_str(cursor.string_value()?))
                }
                ValueType::Clob => ElementValue::Clob(self.arena.alloc_bytes(&cursor.lob_value()?)),
                ValueType::Blob => ElementValue::Blob(self.arena.alloc_bytes(&cursor.lob_value()?)),
                ValueType::List => ElementValue::List(&[]),
                ValueType::SExp => ElementValue::SExp(&[]),
                ValueType::Struct => ElementValue::Struct(&[]),
                other => {
                    return Err(ScanError::unsupported(format!("loading {} values", other)));
                }
            }
        };

        let annotations: Vec<SymbolToken<'t>> = cursor
            .annotation_symbols()?
            .iter()
            .map(|token| self.copy_token(*token))
            .collect();

        Ok(Element {
            field_name: cursor.field_name_symbol()?.map(|token| self.copy_token(token)),
            annotations: self.arena.alloc_slice_copy(&annotations),
            value,
        })
    }

    fn copy_token(&self, token: SymbolToken<'_>) -> SymbolToken<'t> {
        SymbolToken::new(token.text.map(|text| self.arena.alloc_str(text)), token.sid)
    }

    fn copy_int(&self, value: Int<'_>) -> Int<'t> {
        match value {
            Int::I64(v) => Int::I64(v),
            Int::Big {
                negative,
                magnitude,
            } => Int::Big {
                negative,
                magnitude: self.arena.alloc_bytes(magnitude),
            },
        }
    }

    fn copy_decimal(&self, value: Decimal<'_>) -> Decimal<'t> {
        if value.is_negative_zero() {
            Decimal::negative_zero(value.exponent)
        } else {
            Decimal::new(self.copy_int(value.coefficient), value.exponent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{forest_cursor, sample_document};
    use docscan_cursor::ReaderBuilder;
    use num_bigint::BigInt;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_preserves_structure() {
        let source = ElementArena::new();
        let forest = sample_document(&source);
        let mut cursor = forest_cursor(forest);

        let arena = ElementArena::new();
        let loaded = ElementLoader::new(&arena).load_all(&mut cursor).unwrap();

        assert_eq!(loaded, forest);
        assert_eq!(cursor.next().unwrap(), None);
    }

    #[test]
    fn test_load_copies_every_payload() {
        let source = ElementArena::new();
        let big = source.alloc_big_int(&(BigInt::from(-7) << 80));
        let annotations = source.alloc_slice_copy(&[
            SymbolToken::from_text("unit"),
            SymbolToken::from_sid(12),
        ]);
        let fields = source.alloc_slice_copy(&[
            Element::new(ElementValue::Int(big)).with_field_name(SymbolToken::from_text("big")),
            Element::decimal(Decimal::negative_zero(-3))
                .with_field_name(SymbolToken::from_sid(40))
                .with_annotations(annotations),
            Element::blob(b"\x00\x01").with_field_name(SymbolToken::from_text("raw")),
            Element::null(ValueType::Clob).with_field_name(SymbolToken::from_text("none")),
        ]);
        let forest = [Element::sexp(source.alloc_slice_copy(&[Element::structure(fields)]))];

        let arena = ElementArena::new();
        let loaded = ElementLoader::new(&arena)
            .load_all(&mut forest_cursor(&forest))
            .unwrap();

        assert_eq!(loaded, &forest[..]);
        let fields = loaded[0].children()[0].children();
        assert!(matches!(
            fields[1].value,
            ElementValue::Decimal(decimal) if decimal.is_negative_zero() && decimal.exponent == -3
        ));
        assert_eq!(fields[1].field_name, Some(SymbolToken::from_sid(40)));
        assert!(arena.allocated_bytes() > 0);
    }

    #[test]
    fn test_load_from_json() {
        let source = ElementArena::new();
        let mut cursor = ReaderBuilder::new()
            .build_from_buffer(&source, br#"{"a": [1, {"b": null}], "c": "x"} 7"#);

        let arena = ElementArena::new();
        let loaded = ElementLoader::new(&arena).load_all(&mut cursor).unwrap();

        assert_eq!(loaded.len(), 2);
        let a = loaded[0].field("a").unwrap();
        assert_eq!(a.children().len(), 2);
        assert_eq!(
            a.children()[1].field("b").map(|b| b.value),
            Some(ElementValue::Null(ValueType::Null))
        );
        assert_eq!(loaded[1].value, ElementValue::Int(Int::I64(7)));
    }

    #[test]
    fn test_load_deep_nesting() {
        let source = ElementArena::new();
        let mut element = Element::int(0);
        for _ in 0..10_000 {
            element = Element::list(source.alloc_slice_copy(&[element]));
        }
        let forest = [element];

        let arena = ElementArena::new();
        let loaded = ElementLoader::new(&arena)
            .load_all(&mut forest_cursor(&forest))
            .unwrap();

        let mut depth = 0;
        let mut node = &loaded[0];
        while let Some(child) = node.children().first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 10_000);
    }

    #[test]
    fn test_load_malformed_input_fails() {
        let source = ElementArena::new();
        let mut cursor = ReaderBuilder::new().build_from_buffer(&source, br#"[1, 2"#);

        let arena = ElementArena::new();
        let err = ElementLoader::new(&arena).load_all(&mut cursor).unwrap_err();
        assert!(matches!(err, ScanError::MalformedDocument(_)));
    }
}
