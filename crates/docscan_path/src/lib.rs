//! # docscan_path
//!
//! Search paths for docscan.
//!
//! A search path selects nodes by a chain of field names and positions, for
//! example `items.v`, `'odd name'[0]` or `rows.*.id`. A [`PathExtractor`]
//! drives a [`Cursor`](docscan_cursor::Cursor) through a document and invokes
//! a callback at every node one of its paths selects.
//!
//! ## Example
//!
//! ```rust
//! use docscan_cursor::{BufferCursor, Cursor, CursorError, ReaderBuilder};
//! use docscan_element::ElementArena;
//! use docscan_path::{PathExtractor, PathSet};
//!
//! let paths = PathSet::parse_all(["items.v"]).unwrap();
//! let arena = ElementArena::new();
//! let mut cursor = ReaderBuilder::new()
//!     .build_from_buffer(&arena, br#"{"items": [{"v": 1}, {"v": 2}]}"#);
//!
//! let mut seen = Vec::new();
//! let mut extractor = PathExtractor::new(&paths, |cursor: &mut BufferCursor<'_>| {
//!     seen.push(cursor.i64_value()?);
//!     Ok::<_, CursorError>(true)
//! });
//! extractor.match_cursor(&mut cursor).unwrap();
//! drop(extractor);
//!
//! assert_eq!(seen, vec![1, 2]);
//! ```

mod error;
mod extractor;
mod path;

pub use error::PathError;
pub use extractor::PathExtractor;
pub use path::{PathSet, SearchPath, Step};
