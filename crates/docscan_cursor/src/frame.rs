//! Explicit container stack of a cursor.

use docscan_element::Element;

/// One entered container and the cursor's position among its children.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'a> {
    pub container: &'a Element<'a>,
    /// `None` before the first `next`; `Some(len)` once exhausted.
    pub position: Option<usize>,
}

impl<'a> Frame<'a> {
    fn children(&self) -> &'a [Element<'a>] {
        self.container.children()
    }

    /// Returns the child the frame is positioned on.
    pub fn current(&self) -> Option<&'a Element<'a>> {
        self.position.and_then(|position| self.children().get(position))
    }

    /// Moves to the next child and returns it.
    pub fn advance(&mut self) -> Option<&'a Element<'a>> {
        let len = self.children().len();
        let next = match self.position {
            None => 0,
            Some(position) => (position + 1).min(len),
        };
        self.position = Some(next);
        self.current()
    }
}

/// Stack of entered containers, indexed by depth.
#[derive(Debug, Default)]
pub(crate) struct FrameStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> FrameStack<'a> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn top(&self) -> Option<&Frame<'a>> {
        self.frames.last()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut Frame<'a>> {
        self.frames.last_mut()
    }

    pub fn push(&mut self, container: &'a Element<'a>) {
        self.frames.push(Frame {
            container,
            position: None,
        });
    }

    pub fn pop(&mut self) -> Option<Frame<'a>> {
        self.frames.pop()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
