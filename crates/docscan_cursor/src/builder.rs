//! Cursor construction.

use std::io::{BufReader, Read};

use docscan_element::ElementArena;
use serde_json::de::{IoRead, SliceRead};

use crate::{ElementCursor, JsonSource};

/// Window used by incremental stream readers when no size is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 32 * 1024;

/// Cursor over JSON text held in memory.
pub type BufferCursor<'a> = ElementCursor<'a, JsonSource<'a, SliceRead<'a>>>;

/// Cursor over JSON text pulled from a reader.
pub type StreamCursor<'a, R> = ElementCursor<'a, JsonSource<'a, IoRead<BufReader<R>>>>;

/// Builds cursors over buffers and streams.
///
/// An incremental builder reads streams through a window of
/// [`DEFAULT_WINDOW_SIZE`] bytes unless an initial size is configured. A
/// non-incremental builder ignores the configured size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderBuilder {
    incremental: bool,
    initial_window: Option<usize>,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn with_initial_window(mut self, size: Option<usize>) -> Self {
        self.initial_window = size;
        self
    }

    /// Capacity of the stream window, or `None` for the reader default.
    pub fn window_size(&self) -> Option<usize> {
        if self.incremental {
            Some(self.initial_window.unwrap_or(DEFAULT_WINDOW_SIZE))
        } else {
            None
        }
    }

    pub fn build_from_buffer<'a>(
        &self,
        arena: &'a ElementArena,
        bytes: &'a [u8],
    ) -> BufferCursor<'a> {
        ElementCursor::new(JsonSource::new(arena, SliceRead::new(bytes)))
    }

    pub fn build_from_stream<'a, R: Read>(
        &self,
        arena: &'a ElementArena,
        reader: R,
    ) -> StreamCursor<'a, R> {
        let reader = match self.window_size() {
            Some(capacity) => BufReader::with_capacity(capacity, reader),
            None => BufReader::new(reader),
        };
        ElementCursor::new(JsonSource::new(arena, IoRead::new(reader)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cursor;
    use docscan_element::ValueType;
    use rstest::rstest;

    #[rstest]
    #[case::incremental_default(true, None, Some(DEFAULT_WINDOW_SIZE))]
    #[case::incremental_sized(true, Some(4096), Some(4096))]
    #[case::non_incremental(false, None, None)]
    #[case::non_incremental_ignores_size(false, Some(4096), None)]
    fn test_window_size(
        #[case] incremental: bool,
        #[case] initial: Option<usize>,
        #[case] expected: Option<usize>,
    ) {
        let builder = ReaderBuilder::new()
            .incremental(incremental)
            .with_initial_window(initial);
        assert_eq!(builder.window_size(), expected);
    }

    #[test]
    fn test_stream_cursor_reads_values() {
        let arena = ElementArena::new();
        let input = std::io::Cursor::new(br#"{"a": [1, 2]} true"#.to_vec());
        let mut cursor = ReaderBuilder::new()
            .incremental(true)
            .with_initial_window(Some(8))
            .build_from_stream(&arena, input);

        assert_eq!(cursor.next().unwrap(), Some(ValueType::Struct));
        cursor.step_in().unwrap();
        assert_eq!(cursor.next().unwrap(), Some(ValueType::List));
        cursor.step_out().unwrap();
        assert_eq!(cursor.next().unwrap(), Some(ValueType::Bool));
        assert_eq!(cursor.next().unwrap(), None);
    }
}
