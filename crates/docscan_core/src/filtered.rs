//! Path-filtered traversal.

use docscan_cursor::Cursor;
use docscan_path::{PathExtractor, PathSet};

use crate::ScanError;
use crate::dispatch::ValueDispatcher;
use crate::sink::ValueSink;

/// Dispatches every node selected by `paths`.
///
/// The path extractor drives the cursor; each match is dispatched with its
/// field name when its parent is a struct. Scanning always continues after a
/// match, so every match inside a container is delivered.
pub fn traverse_paths<'a, C, S>(
    paths: &PathSet,
    dispatcher: &mut ValueDispatcher<'_, S>,
    cursor: &mut C,
) -> Result<(), ScanError>
where
    C: Cursor<'a>,
    S: ValueSink + ?Sized,
{
    let mut extractor = PathExtractor::new(paths, |cursor: &mut C| {
        let in_struct = cursor.is_in_struct();
        dispatcher.consume_value(cursor, in_struct)?;
        Ok::<_, ScanError>(true)
    });
    extractor.match_cursor(cursor)
}
