//! Visitor trait for traversing element trees.

use std::ops::ControlFlow;

use crate::Element;

use super::walk::{walk_children, walk_element};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue visiting
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Visitor trait for traversing elements without modification.
///
/// The `'a` lifetime ties visited elements to their arena.
pub trait Visitor<'a>: Sized {
    /// Called before an element is visited.
    #[inline]
    fn enter_element(&mut self, _element: &'a Element<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called after an element and all its children were visited.
    #[inline]
    fn exit_element(&mut self, _element: &'a Element<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visits any element by dispatching on whether it is a container.
    #[inline]
    fn visit_element(&mut self, element: &'a Element<'a>) -> VisitResult {
        walk_element(self, element)
    }

    /// Visit a scalar, a null, or a large object.
    fn visit_scalar(&mut self, _element: &'a Element<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Visit a list, sexp or struct. The default walks the children.
    fn visit_container(&mut self, element: &'a Element<'a>) -> VisitResult {
        walk_children(self, element)
    }
}
