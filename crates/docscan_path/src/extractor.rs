//! Path extractor.
//!
//! Drives a cursor through a document and invokes a callback at every node
//! selected by one of its search paths.

use docscan_cursor::{Cursor, CursorError};
use docscan_element::ValueType;

use crate::{PathSet, Step};

/// Progress of one path: `consumed` steps of `path` matched so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Partial {
    path: usize,
    consumed: usize,
}

/// A container being scanned: its type, the index of its next child and the
/// partial matches its children are tested against.
#[derive(Debug)]
struct Frame {
    container: ValueType,
    index: usize,
    pending: Vec<Partial>,
}

/// What to do after the node under the cursor was visited.
#[derive(Debug)]
enum Visit {
    Done,
    StepIn(Frame),
    /// The callback returned false.
    LeaveParent,
}

/// Invokes a callback for every node matched by a [`PathSet`].
///
/// The callback receives the cursor positioned on the matched node. It may
/// read the node, including stepping into it, but must leave the cursor at
/// the depth it was called at. It returns `true` to keep scanning the
/// siblings of the matched node, or `false` to leave the enclosing container
/// (at top level: to stop matching).
///
/// Inside a list or sexp, a field step does not consume an element: it is
/// carried through to the element's children, so `items.v` selects the `v`
/// field of every struct in `items`.
pub struct PathExtractor<'p, F> {
    paths: &'p PathSet,
    on_match: F,
}

impl<'p, F> PathExtractor<'p, F> {
    pub fn new(paths: &'p PathSet, on_match: F) -> Self {
        Self { paths, on_match }
    }

    /// Matches every top-level value the cursor yields.
    pub fn match_cursor<'a, C, E>(&mut self, cursor: &mut C) -> Result<(), E>
    where
        C: Cursor<'a>,
        F: FnMut(&mut C) -> Result<bool, E>,
        E: From<CursorError>,
    {
        let roots: Vec<Partial> = (0..self.paths.len())
            .map(|path| Partial { path, consumed: 0 })
            .collect();
        if roots.is_empty() {
            return Ok(());
        }

        while cursor.next()?.is_some() {
            if !self.scan(cursor, roots.clone())? {
                break;
            }
        }
        Ok(())
    }

    /// Scans the top-level value the cursor is on. Returns false when the
    /// callback asked to stop at top level.
    ///
    /// Containers are tracked on an explicit stack, so nesting depth is
    /// bounded by memory only.
    fn scan<'a, C, E>(&mut self, cursor: &mut C, roots: Vec<Partial>) -> Result<bool, E>
    where
        C: Cursor<'a>,
        F: FnMut(&mut C) -> Result<bool, E>,
        E: From<CursorError>,
    {
        let mut stack: Vec<Frame> = Vec::new();
        let mut partials = roots;

        loop {
            match self.visit(cursor, &partials)? {
                Visit::Done => {}
                Visit::StepIn(frame) => {
                    cursor.step_in()?;
                    stack.push(frame);
                }
                Visit::LeaveParent => {
                    if stack.pop().is_none() {
                        return Ok(false);
                    }
                    cursor.step_out()?;
                }
            }

            // Move to the next child that still has partial matches.
            loop {
                let Some(frame) = stack.last_mut() else {
                    return Ok(true);
                };
                if cursor.next()?.is_none() {
                    stack.pop();
                    cursor.step_out()?;
                    continue;
                }
                let next = self.advance(cursor, frame.container, frame.index, &frame.pending)?;
                frame.index += 1;
                if !next.is_empty() {
                    partials = next;
                    break;
                }
            }
        }
    }

    /// Invokes the callback for every path complete at the node the cursor is
    /// on, then decides whether to step into it.
    fn visit<'a, C, E>(&mut self, cursor: &mut C, partials: &[Partial]) -> Result<Visit, E>
    where
        C: Cursor<'a>,
        F: FnMut(&mut C) -> Result<bool, E>,
        E: From<CursorError>,
    {
        let mut pending = Vec::new();
        for partial in partials {
            if partial.consumed == self.step_count(partial.path) {
                if !self.invoke(cursor)? {
                    return Ok(Visit::LeaveParent);
                }
            } else {
                pending.push(*partial);
            }
        }

        if pending.is_empty() || cursor.is_null() {
            return Ok(Visit::Done);
        }
        Ok(match cursor.value_type().filter(ValueType::is_container) {
            Some(container) => Visit::StepIn(Frame {
                container,
                index: 0,
                pending,
            }),
            None => Visit::Done,
        })
    }

    /// Computes the partial matches of the child at `index` of a container.
    fn advance<'a, C>(
        &self,
        cursor: &C,
        container: ValueType,
        index: usize,
        pending: &[Partial],
    ) -> Result<Vec<Partial>, CursorError>
    where
        C: Cursor<'a>,
    {
        let field_name = if container == ValueType::Struct {
            cursor.field_name_symbol()?.and_then(|token| token.text)
        } else {
            None
        };

        let mut next = Vec::new();
        for partial in pending {
            let Some(step) = self.step(partial.path, partial.consumed) else {
                continue;
            };
            let matched = match step {
                Step::Wildcard => true,
                Step::Index(n) => *n == index,
                Step::Field(name) => {
                    if container.is_sequence() {
                        push_unique(&mut next, *partial);
                        continue;
                    }
                    field_name == Some(name.as_str())
                }
            };
            if matched {
                push_unique(
                    &mut next,
                    Partial {
                        path: partial.path,
                        consumed: partial.consumed + 1,
                    },
                );
            }
        }
        Ok(next)
    }

    fn invoke<'a, C, E>(&mut self, cursor: &mut C) -> Result<bool, E>
    where
        C: Cursor<'a>,
        F: FnMut(&mut C) -> Result<bool, E>,
        E: From<CursorError>,
    {
        let depth = cursor.depth();
        let keep_scanning = (self.on_match)(cursor)?;
        if cursor.depth() != depth {
            return Err(CursorError::invalid_state(format!(
                "match callback moved the cursor from depth {} to {}",
                depth,
                cursor.depth()
            ))
            .into());
        }
        Ok(keep_scanning)
    }

    fn step_count(&self, path: usize) -> usize {
        self.paths.get(path).map_or(0, |p| p.steps().len())
    }

    fn step(&self, path: usize, position: usize) -> Option<&Step> {
        self.paths.get(path)?.steps().get(position)
    }
}

fn push_unique(partials: &mut Vec<Partial>, partial: Partial) {
    if !partials.contains(&partial) {
        partials.push(partial);
    }
}
