//! Cursor trait definition.

use docscan_element::{Decimal, Int, IntegerSize, SymbolToken, Timestamp, ValueType};
use num_bigint::BigInt;

use crate::CursorError;

/// Outcome of one [`Cursor::read_chunk`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRead {
    /// Number of bytes written to the buffer.
    pub len: usize,
    /// True once the last byte of the large object has been read.
    pub end_of_object: bool,
}

/// A pull-based, forward-only view over a document.
///
/// The cursor is positioned on at most one node at a time. [`next`] moves to
/// the next sibling at the current depth, [`step_in`] enters the container the
/// cursor is positioned on and [`step_out`] leaves it again, after which the
/// cursor is still positioned on that container.
///
/// Values returned by the getters live as long as the document they were
/// decoded into (`'a`).
///
/// [`next`]: Cursor::next
/// [`step_in`]: Cursor::step_in
/// [`step_out`]: Cursor::step_out
pub trait Cursor<'a> {
    /// Advances to the next node at the current depth.
    ///
    /// Returns `None` once the current level is exhausted.
    fn next(&mut self) -> Result<Option<ValueType>, CursorError>;

    /// Returns the type of the current node.
    fn value_type(&self) -> Option<ValueType>;

    /// Returns true if the current node is a (possibly typed) null.
    fn is_null(&self) -> bool;

    /// Number of containers the cursor is inside of.
    fn depth(&self) -> usize;

    /// Type of the innermost container the cursor is inside of.
    fn container_type(&self) -> Option<ValueType>;

    fn step_in(&mut self) -> Result<(), CursorError>;

    fn step_out(&mut self) -> Result<(), CursorError>;

    /// Field name of the current node, present only inside a struct.
    fn field_name_symbol(&self) -> Result<Option<SymbolToken<'a>>, CursorError>;

    /// Annotations of the current node in document order.
    fn annotation_symbols(&self) -> Result<&'a [SymbolToken<'a>], CursorError>;

    fn bool_value(&self) -> Result<bool, CursorError>;

    fn int_value(&self) -> Result<Int<'a>, CursorError>;

    fn f64_value(&self) -> Result<f64, CursorError>;

    fn decimal_value(&self) -> Result<Decimal<'a>, CursorError>;

    fn timestamp_value(&self) -> Result<Timestamp, CursorError>;

    fn symbol_value(&self) -> Result<SymbolToken<'a>, CursorError>;

    fn string_value(&self) -> Result<&'a str, CursorError>;

    /// Total payload size of the current large object.
    fn byte_size(&self) -> Result<usize, CursorError>;

    /// Reads the whole payload of the current large object into a new buffer.
    fn lob_value(&mut self) -> Result<Vec<u8>, CursorError>;

    /// Reads the next chunk of the current large object into `buf`.
    ///
    /// Successive calls continue where the previous one stopped. The read
    /// position resets whenever the cursor moves.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<ChunkRead, CursorError>;

    /// Returns true if the current node is a direct child of a struct.
    fn is_in_struct(&self) -> bool {
        self.container_type() == Some(ValueType::Struct)
    }

    /// Resolved text of the current node's field name.
    fn field_name(&self) -> Result<Option<&'a str>, CursorError> {
        self.field_name_symbol()?.map(resolve).transpose()
    }

    /// Iterates the current node's annotations as text, resolving each one
    /// only when it is pulled.
    fn iter_annotations(&self) -> Result<Annotations<'a>, CursorError> {
        Ok(Annotations {
            tokens: self.annotation_symbols()?.iter(),
        })
    }

    fn integer_size(&self) -> Result<IntegerSize, CursorError> {
        Ok(self.int_value()?.size())
    }

    fn i32_value(&self) -> Result<i32, CursorError> {
        let value = self.int_value()?;
        value
            .as_i32()
            .ok_or_else(|| CursorError::out_of_range(format!("{} does not fit in i32", value)))
    }

    fn i64_value(&self) -> Result<i64, CursorError> {
        let value = self.int_value()?;
        value
            .as_i64()
            .ok_or_else(|| CursorError::out_of_range(format!("{} does not fit in i64", value)))
    }

    fn big_int_value(&self) -> Result<BigInt, CursorError> {
        Ok(self.int_value()?.to_bigint())
    }

    /// Releases the cursor's position. Further reads fail.
    fn close(&mut self) -> Result<(), CursorError> {
        Ok(())
    }
}

/// Lazily resolved annotations of one node.
///
/// Returned by [`Cursor::iter_annotations`].
#[derive(Debug, Clone)]
pub struct Annotations<'a> {
    tokens: std::slice::Iter<'a, SymbolToken<'a>>,
}

impl<'a> Iterator for Annotations<'a> {
    type Item = Result<&'a str, CursorError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(|token| resolve(*token))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tokens.size_hint()
    }
}

impl ExactSizeIterator for Annotations<'_> {}

/// Returns the text of a token, or an error when only its id is known.
pub(crate) fn resolve(token: SymbolToken<'_>) -> Result<&str, CursorError> {
    token.text.ok_or(CursorError::UnresolvableSymbol {
        sid: token.sid.unwrap_or(0),
    })
}
