//! Visitor pattern for element trees.
//!
//! # Overview
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`walk_element`] - Dispatch function for scalar and container visitors
//! - [`walk_children`] - Traverse all children of an element
//! - [`walk_tree`] - Iterative walk for trees of any depth
//!
//! # Example
//!
//! ```rust
//! use docscan_element::{Element, ElementArena, ElementValue, SymbolToken};
//! use docscan_element::visitor::{Visitor, VisitResult, walk_element};
//! use std::ops::ControlFlow;
//!
//! struct StringCollector<'a> {
//!     strings: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for StringCollector<'a> {
//!     fn visit_scalar(&mut self, element: &'a Element<'a>) -> VisitResult {
//!         if let ElementValue::String(text) = element.value {
//!             self.strings.push(text);
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = ElementArena::new();
//! let fields = arena.alloc_slice_copy(&[
//!     Element::string("x").with_field_name(SymbolToken::from_text("c")),
//! ]);
//! let root = arena.alloc(Element::structure(fields));
//!
//! let mut collector = StringCollector { strings: Vec::new() };
//! walk_element(&mut collector, root);
//! assert_eq!(collector.strings, vec!["x"]);
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_children, walk_element, walk_tree};
