//! # docscan_cursor
//!
//! Forward-only cursors for docscan.
//!
//! This crate provides:
//! - The [`Cursor`] trait consumed by the traversal engines
//! - [`ElementCursor`], a cursor over arena elements with an explicit frame stack
//! - [`JsonSource`], which decodes JSON text one top-level value at a time
//! - [`ReaderBuilder`], which builds cursors over buffers and streams
//!
//! ## Example
//!
//! ```rust
//! use docscan_cursor::{Cursor, ReaderBuilder};
//! use docscan_element::{ElementArena, ValueType};
//!
//! let arena = ElementArena::new();
//! let mut cursor = ReaderBuilder::new()
//!     .build_from_buffer(&arena, br#"{"a": 1}"#);
//!
//! assert_eq!(cursor.next().unwrap(), Some(ValueType::Struct));
//! cursor.step_in().unwrap();
//! assert_eq!(cursor.next().unwrap(), Some(ValueType::Int));
//! assert_eq!(cursor.field_name().unwrap(), Some("a"));
//! assert_eq!(cursor.i32_value().unwrap(), 1);
//! ```

mod builder;
mod element_cursor;
mod error;
mod frame;
mod json;
mod traits;

pub use builder::{BufferCursor, DEFAULT_WINDOW_SIZE, ReaderBuilder, StreamCursor};
pub use element_cursor::{ElementCursor, SliceSource, TopLevelSource};
pub use error::CursorError;
pub use json::JsonSource;
pub use traits::{Annotations, ChunkRead, Cursor};
