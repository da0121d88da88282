//! Value dispatch.
//!
//! Extracts every observable piece of the node a cursor is positioned on and
//! hands it to a [`ValueSink`], according to a [`ConsumptionPolicy`].

use docscan_cursor::Cursor;
use docscan_element::{IntegerSize, SymbolToken, ValueType};

use crate::ScanError;
use crate::config::{
    ConsumptionPolicy, DecimalRepresentation, LargeObjectStrategy, SymbolRepresentation,
};
use crate::sink::{Value, ValueSink};
use crate::traversal::fully_traverse;

/// Size of the reusable buffer used for chunked large object reads.
pub const LOB_CHUNK_SIZE: usize = 1024;

/// What the caller has to do after a node was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The node was consumed completely.
    Leaf,
    /// The node is a container whose children still have to be consumed.
    Enter {
        /// True if the container is a struct.
        in_struct: bool,
    },
}

/// Delivers decoded values to a sink.
///
/// A dispatcher lives for one read. Under [`LargeObjectStrategy::Chunked`] it
/// owns one chunk buffer of [`LOB_CHUNK_SIZE`] bytes, allocated on creation
/// and reused for every large object of that read.
pub struct ValueDispatcher<'s, S: ValueSink + ?Sized> {
    policy: &'s ConsumptionPolicy,
    sink: &'s mut S,
    chunk: Option<Box<[u8]>>,
}

impl<'s, S: ValueSink + ?Sized> ValueDispatcher<'s, S> {
    pub fn new(policy: &'s ConsumptionPolicy, sink: &'s mut S) -> Self {
        let chunk = match policy.large_objects {
            LargeObjectStrategy::Whole => None,
            LargeObjectStrategy::Chunked => Some(vec![0u8; LOB_CHUNK_SIZE].into_boxed_slice()),
        };
        Self {
            policy,
            sink,
            chunk,
        }
    }

    /// Consumes the current node, including all of its children.
    ///
    /// The cursor is left on the node.
    pub fn consume_value<'a, C>(
        &mut self,
        cursor: &mut C,
        in_struct: bool,
    ) -> Result<(), ScanError>
    where
        C: Cursor<'a>,
    {
        if let Step::Enter { in_struct } = self.consume_node(cursor, in_struct)? {
            cursor.step_in()?;
            fully_traverse(self, cursor, in_struct)?;
            cursor.step_out()?;
        }
        Ok(())
    }

    /// Consumes the current node without descending into it.
    ///
    /// Delivers the field name (when `in_struct`), the annotations and, unless
    /// the node is null, its scalar value. Containers are reported as
    /// [`Step::Enter`] and left to the caller.
    pub fn consume_node<'a, C>(
        &mut self,
        cursor: &mut C,
        in_struct: bool,
    ) -> Result<Step, ScanError>
    where
        C: Cursor<'a>,
    {
        if in_struct {
            self.field_name(cursor)?;
        }
        self.annotations(cursor)?;

        if cursor.is_null() {
            return Ok(Step::Leaf);
        }
        let Some(value_type) = cursor.value_type() else {
            return Ok(Step::Leaf);
        };

        match value_type {
            ValueType::Bool => self.sink.consume(Value::Bool(cursor.bool_value()?)),
            ValueType::Int => {
                let value = match cursor.integer_size()? {
                    IntegerSize::Int => Value::I32(cursor.i32_value()?),
                    IntegerSize::Long => Value::I64(cursor.i64_value()?),
                    IntegerSize::BigInt => Value::BigInt(cursor.big_int_value()?),
                };
                self.sink.consume(value);
            }
            ValueType::Float => self.sink.consume(Value::F64(cursor.f64_value()?)),
            ValueType::Decimal => {
                let decimal = cursor.decimal_value()?;
                let value = match self.policy.decimals {
                    DecimalRepresentation::Exact => Value::Decimal(decimal),
                    DecimalRepresentation::Native => match decimal.to_native() {
                        Some(native) => Value::NativeDecimal(native),
                        None => return Err(ScanError::UnrepresentableDecimal(decimal.to_string())),
                    },
                };
                self.sink.consume(value);
            }
            ValueType::Timestamp => {
                self.sink.consume(Value::Timestamp(cursor.timestamp_value()?));
            }
            ValueType::Symbol => {
                let token = cursor.symbol_value()?;
                self.symbol(token)?;
            }
            ValueType::String => self.sink.consume(Value::Str(cursor.string_value()?)),
            ValueType::Clob | ValueType::Blob => self.large_object(cursor)?,
            ValueType::List | ValueType::SExp => return Ok(Step::Enter { in_struct: false }),
            ValueType::Struct => return Ok(Step::Enter { in_struct: true }),
            _ => {}
        }
        Ok(Step::Leaf)
    }

    fn field_name<'a, C: Cursor<'a>>(&mut self, cursor: &C) -> Result<(), ScanError> {
        match self.policy.symbols {
            SymbolRepresentation::Token => {
                if let Some(token) = cursor.field_name_symbol()? {
                    self.sink.consume(Value::Symbol(token));
                }
            }
            SymbolRepresentation::String => {
                if let Some(name) = cursor.field_name()? {
                    self.sink.consume(Value::Str(name));
                }
            }
        }
        Ok(())
    }

    fn annotations<'a, C: Cursor<'a>>(&mut self, cursor: &C) -> Result<(), ScanError> {
        match self.policy.symbols {
            SymbolRepresentation::Token => {
                self.sink.consume(Value::Symbols(cursor.annotation_symbols()?));
            }
            SymbolRepresentation::String => {
                for annotation in cursor.iter_annotations()? {
                    self.sink.consume(Value::Str(annotation?));
                }
            }
        }
        Ok(())
    }

    fn symbol(&mut self, token: SymbolToken<'_>) -> Result<(), ScanError> {
        match self.policy.symbols {
            SymbolRepresentation::Token => self.sink.consume(Value::Symbol(token)),
            SymbolRepresentation::String => {
                let text = token.text.ok_or(ScanError::UnresolvableSymbolToken {
                    sid: token.sid.unwrap_or(0),
                })?;
                self.sink.consume(Value::Str(text));
            }
        }
        Ok(())
    }

    fn large_object<'a, C: Cursor<'a>>(&mut self, cursor: &mut C) -> Result<(), ScanError> {
        let Some(buffer) = self.chunk.as_deref_mut() else {
            let bytes = cursor.lob_value()?;
            self.sink.consume(Value::Bytes(&bytes));
            return Ok(());
        };

        let size = cursor.byte_size()?;
        let mut read = 0usize;
        while read < size {
            let requested = buffer.len().min(size - read);
            let chunk = cursor.read_chunk(buffer)?;
            if chunk.len < requested && !chunk.end_of_object {
                return Err(ScanError::IncompleteLargeObjectRead {
                    requested,
                    read: chunk.len,
                });
            }
            read = read.saturating_add(chunk.len);
            if chunk.end_of_object {
                break;
            }
        }

        self.sink.consume(Value::Byte(buffer[0]));
        Ok(())
    }
}
