//! Walk functions for element traversal.

use std::ops::ControlFlow;

use crate::Element;

use super::visit::{VisitResult, Visitor};

/// Walks an element.
///
/// Calls `enter_element`, then `visit_container` for non-null containers and
/// `visit_scalar` for everything else, then `exit_element`.
pub fn walk_element<'a, V>(visitor: &mut V, element: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    visitor.enter_element(element)?;

    if !element.is_null() && element.value_type().is_container() {
        visitor.visit_container(element)?;
    } else {
        visitor.visit_scalar(element)?;
    }

    visitor.exit_element(element)
}

/// Walks all children of an element, stopping on `ControlFlow::Break`.
#[inline]
pub fn walk_children<'a, V>(visitor: &mut V, element: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    for child in element.children() {
        visitor.visit_element(child)?;
    }
    ControlFlow::Continue(())
}

/// Walks an element and all its descendants without recursing.
///
/// Calls `enter_element` and `exit_element` for every element and
/// `visit_scalar` for every non-container, in the same order as
/// [`walk_element`]. `visit_element` and `visit_container` are not called, so
/// the depth of the tree is bounded by memory only.
pub fn walk_tree<'a, V>(visitor: &mut V, root: &'a Element<'a>) -> VisitResult
where
    V: Visitor<'a>,
{
    // Open containers and the index of their next child.
    let mut stack: Vec<(&'a Element<'a>, usize)> = Vec::new();
    let mut next = Some(root);

    loop {
        if let Some(element) = next.take() {
            visitor.enter_element(element)?;
            if !element.is_null() && element.value_type().is_container() {
                stack.push((element, 0));
            } else {
                visitor.visit_scalar(element)?;
                visitor.exit_element(element)?;
            }
        }

        let Some((parent, index)) = stack.last_mut() else {
            return ControlFlow::Continue(());
        };
        match parent.children().get(*index) {
            Some(child) => {
                *index += 1;
                next = Some(child);
            }
            None => {
                let parent = *parent;
                stack.pop();
                visitor.exit_element(parent)?;
            }
        }
    }
}
