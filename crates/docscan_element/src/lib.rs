//! # docscan_element
//!
//! Element value model for docscan.
//!
//! This crate provides the typed values a cursor hands out while walking a
//! document, and the immutable [`Element`] tree produced when a document is
//! fully materialized.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - Every element, string, byte payload and big-integer magnitude decoded
//!   during one read lives in the same arena
//! - Elements are `Copy` and hold only arena references, so nothing needs
//!   dropping when the arena is freed
//!
//! ## Example
//!
//! ```rust
//! use docscan_element::{Element, ElementArena, SymbolToken, ValueType};
//!
//! let arena = ElementArena::new();
//!
//! let fields = arena.alloc_slice_copy(&[
//!     Element::int(1).with_field_name(SymbolToken::from_text("a")),
//!     Element::string("x").with_field_name(SymbolToken::from_text("c")),
//! ]);
//! let document = Element::structure(fields);
//!
//! assert_eq!(document.value_type(), ValueType::Struct);
//! assert_eq!(document.children().len(), 2);
//! ```

mod arena;
mod decimal;
mod element;
mod int;
mod symbol;
mod value_type;
pub mod visitor;

pub use arena::ElementArena;
pub use decimal::Decimal;
pub use element::{Element, ElementValue, Timestamp};
pub use int::{Int, IntegerSize};
pub use symbol::SymbolToken;
pub use value_type::ValueType;

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor};
