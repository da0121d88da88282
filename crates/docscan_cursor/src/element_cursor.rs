//! Cursor over arena elements.

use docscan_element::{Decimal, Element, ElementValue, Int, SymbolToken, Timestamp, ValueType};

use crate::frame::FrameStack;
use crate::{ChunkRead, Cursor, CursorError};

/// Supplies the top-level values of a document, one at a time.
pub trait TopLevelSource<'a> {
    /// Returns the next top-level value, or `None` at end of input.
    fn next_value(&mut self) -> Result<Option<&'a Element<'a>>, CursorError>;
}

/// Top-level values taken from an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    elements: &'a [Element<'a>],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(elements: &'a [Element<'a>]) -> Self {
        Self {
            elements,
            position: 0,
        }
    }
}

impl<'a> TopLevelSource<'a> for SliceSource<'a> {
    fn next_value(&mut self) -> Result<Option<&'a Element<'a>>, CursorError> {
        let element = self.elements.get(self.position);
        if element.is_some() {
            self.position += 1;
        }
        Ok(element)
    }
}

/// A [`Cursor`] over elements.
///
/// Containers are tracked on an explicit frame stack, so nesting depth is
/// bounded only by memory. Top-level values are pulled from the source as the
/// cursor reaches them.
#[derive(Debug)]
pub struct ElementCursor<'a, S> {
    source: S,
    top: Option<&'a Element<'a>>,
    frames: FrameStack<'a>,
    lob_offset: usize,
    closed: bool,
}

impl<'a> ElementCursor<'a, SliceSource<'a>> {
    /// Creates a cursor over an already materialized forest.
    pub fn over_elements(elements: &'a [Element<'a>]) -> Self {
        Self::new(SliceSource::new(elements))
    }
}

impl<'a, S: TopLevelSource<'a>> ElementCursor<'a, S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            top: None,
            frames: FrameStack::new(),
            lob_offset: 0,
            closed: false,
        }
    }

    fn current(&self) -> Option<&'a Element<'a>> {
        match self.frames.top() {
            Some(frame) => frame.current(),
            None => self.top,
        }
    }

    fn current_value(&self) -> Result<&'a Element<'a>, CursorError> {
        if self.closed {
            return Err(CursorError::invalid_state("cursor is closed"));
        }
        self.current()
            .ok_or_else(|| CursorError::invalid_state("cursor is not positioned on a value"))
    }

    /// Returns the current value, failing on nulls.
    fn non_null(&self, expected: ValueType) -> Result<&'a Element<'a>, CursorError> {
        let element = self.current_value()?;
        if element.is_null() {
            return Err(CursorError::invalid_state(format!(
                "cannot read {} from a null",
                expected
            )));
        }
        Ok(element)
    }

    fn lob(&self) -> Result<&'a [u8], CursorError> {
        let element = self.non_null(ValueType::Blob)?;
        element
            .lob_bytes()
            .ok_or_else(|| CursorError::type_mismatch(ValueType::Blob, element.value_type()))
    }
}

macro_rules! scalar_getter {
    ($name:ident, $ret:ty, $value_type:expr, $pattern:pat => $out:expr) => {
        fn $name(&self) -> Result<$ret, CursorError> {
            let element = self.non_null($value_type)?;
            match element.value {
                $pattern => Ok($out),
                _ => Err(CursorError::type_mismatch($value_type, element.value_type())),
            }
        }
    };
}

impl<'a, S: TopLevelSource<'a>> Cursor<'a> for ElementCursor<'a, S> {
    fn next(&mut self) -> Result<Option<ValueType>, CursorError> {
        if self.closed {
            return Err(CursorError::invalid_state("cursor is closed"));
        }
        self.lob_offset = 0;

        let next = match self.frames.top_mut() {
            Some(frame) => frame.advance(),
            None => {
                self.top = self.source.next_value()?;
                self.top
            }
        };
        Ok(next.map(Element::value_type))
    }

    fn value_type(&self) -> Option<ValueType> {
        self.current().map(Element::value_type)
    }

    fn is_null(&self) -> bool {
        self.current().is_some_and(Element::is_null)
    }

    fn depth(&self) -> usize {
        self.frames.depth()
    }

    fn container_type(&self) -> Option<ValueType> {
        self.frames.top().map(|frame| frame.container.value_type())
    }

    fn step_in(&mut self) -> Result<(), CursorError> {
        let element = self.current_value()?;
        if element.is_null() || !element.value_type().is_container() {
            return Err(CursorError::invalid_state(format!(
                "cannot step into {}",
                element.value_type()
            )));
        }
        self.frames.push(element);
        self.lob_offset = 0;
        Ok(())
    }

    fn step_out(&mut self) -> Result<(), CursorError> {
        if self.closed {
            return Err(CursorError::invalid_state("cursor is closed"));
        }
        self.frames
            .pop()
            .ok_or_else(|| CursorError::invalid_state("cannot step out of the top level"))?;
        self.lob_offset = 0;
        Ok(())
    }

    fn field_name_symbol(&self) -> Result<Option<SymbolToken<'a>>, CursorError> {
        let element = self.current_value()?;
        if self.is_in_struct() {
            Ok(element.field_name)
        } else {
            Ok(None)
        }
    }

    fn annotation_symbols(&self) -> Result<&'a [SymbolToken<'a>], CursorError> {
        Ok(self.current_value()?.annotations)
    }

    scalar_getter!(bool_value, bool, ValueType::Bool, ElementValue::Bool(v) => v);
    scalar_getter!(int_value, Int<'a>, ValueType::Int, ElementValue::Int(v) => v);
    scalar_getter!(f64_value, f64, ValueType::Float, ElementValue::Float(v) => v);
    scalar_getter!(decimal_value, Decimal<'a>, ValueType::Decimal, ElementValue::Decimal(v) => v);
    scalar_getter!(timestamp_value, Timestamp, ValueType::Timestamp, ElementValue::Timestamp(v) => v);
    scalar_getter!(symbol_value, SymbolToken<'a>, ValueType::Symbol, ElementValue::Symbol(v) => v);
    scalar_getter!(string_value, &'a str, ValueType::String, ElementValue::String(v) => v);

    fn byte_size(&self) -> Result<usize, CursorError> {
        Ok(self.lob()?.len())
    }

    fn lob_value(&mut self) -> Result<Vec<u8>, CursorError> {
        Ok(self.lob()?.to_vec())
    }

    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<ChunkRead, CursorError> {
        let bytes = self.lob()?;
        let remaining = bytes.get(self.lob_offset..).unwrap_or_default();
        let len = remaining.len().min(buf.len());

        buf[..len].copy_from_slice(&remaining[..len]);
        self.lob_offset += len;

        Ok(ChunkRead {
            len,
            end_of_object: self.lob_offset >= bytes.len(),
        })
    }

    fn close(&mut self) -> Result<(), CursorError> {
        self.frames.clear();
        self.top = None;
        self.closed = true;
        Ok(())
    }
}
