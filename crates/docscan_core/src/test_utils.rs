//! Helpers shared by the engine tests.

use docscan_cursor::{ChunkRead, Cursor, CursorError, ElementCursor, SliceSource};
use docscan_element::{Decimal, Element, ElementArena, Int, SymbolToken, Timestamp, ValueType};

/// Returns a cursor over an in-memory forest.
pub fn forest_cursor<'a>(forest: &'a [Element<'a>]) -> ElementCursor<'a, SliceSource<'a>> {
    ElementCursor::over_elements(forest)
}

/// `{a:1, b:[2,3], c:"x"}` as a one-element forest.
pub fn sample_document(arena: &ElementArena) -> &[Element<'_>] {
    let items = arena.alloc_slice_copy(&[Element::int(2), Element::int(3)]);
    let fields = arena.alloc_slice_copy(&[
        Element::int(1).with_field_name(SymbolToken::from_text("a")),
        Element::list(items).with_field_name(SymbolToken::from_text("b")),
        Element::string("x").with_field_name(SymbolToken::from_text("c")),
    ]);
    arena.alloc_slice_copy(&[Element::structure(fields)])
}

/// Wraps a cursor and records every chunk read.
///
/// With a limit set, each read is capped at that many bytes and never
/// reports the end of the object.
pub struct ChunkRecorder<C> {
    inner: C,
    reads: Vec<usize>,
    limit: Option<usize>,
}

impl<C> ChunkRecorder<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            reads: Vec::new(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Lengths of every chunk read so far.
    pub fn reads(&self) -> &[usize] {
        &self.reads
    }
}

impl<'a, C: Cursor<'a>> Cursor<'a> for ChunkRecorder<C> {
    fn next(&mut self) -> Result<Option<ValueType>, CursorError> {
        self.inner.next()
    }

    fn value_type(&self) -> Option<ValueType> {
        self.inner.value_type()
    }

    fn is_null(&self) -> bool {
        self.inner.is_null()
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn container_type(&self) -> Option<ValueType> {
        self.inner.container_type()
    }

    fn step_in(&mut self) -> Result<(), CursorError> {
        self.inner.step_in()
    }

    fn step_out(&mut self) -> Result<(), CursorError> {
        self.inner.step_out()
    }

    fn field_name_symbol(&self) -> Result<Option<SymbolToken<'a>>, CursorError> {
        self.inner.field_name_symbol()
    }

    fn annotation_symbols(&self) -> Result<&'a [SymbolToken<'a>], CursorError> {
        self.inner.annotation_symbols()
    }

    fn bool_value(&self) -> Result<bool, CursorError> {
        self.inner.bool_value()
    }

    fn int_value(&self) -> Result<Int<'a>, CursorError> {
        self.inner.int_value()
    }

    fn f64_value(&self) -> Result<f64, CursorError> {
        self.inner.f64_value()
    }

    fn decimal_value(&self) -> Result<Decimal<'a>, CursorError> {
        self.inner.decimal_value()
    }

    fn timestamp_value(&self) -> Result<Timestamp, CursorError> {
        self.inner.timestamp_value()
    }

    fn symbol_value(&self) -> Result<SymbolToken<'a>, CursorError> {
        self.inner.symbol_value()
    }

    fn string_value(&self) -> Result<&'a str, CursorError> {
        self.inner.string_value()
    }

    fn byte_size(&self) -> Result<usize, CursorError> {
        self.inner.byte_size()
    }

    fn lob_value(&mut self) -> Result<Vec<u8>, CursorError> {
        self.inner.lob_value()
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<ChunkRead, CursorError> {
        let read = match self.limit {
            Some(limit) => {
                let len = limit.min(buf.len());
                let chunk = self.inner.read_chunk(&mut buf[..len])?;
                ChunkRead {
                    len: chunk.len,
                    end_of_object: false,
                }
            }
            None => self.inner.read_chunk(buf)?,
        };
        self.reads.push(read.len);
        Ok(read)
    }
}
