//! Full traversal.

use docscan_cursor::Cursor;

use crate::ScanError;
use crate::dispatch::{Step, ValueDispatcher};
use crate::sink::ValueSink;

/// Dispatches every remaining node at the cursor's current level, descending
/// into every container on the way.
///
/// Nested containers are tracked on an explicit stack of "parent is a struct"
/// flags, so document depth does not grow the call stack. Every container
/// entered here is left again; the cursor ends at the level it started at,
/// with that level exhausted.
pub fn fully_traverse<'a, C, S>(
    dispatcher: &mut ValueDispatcher<'_, S>,
    cursor: &mut C,
    in_struct: bool,
) -> Result<(), ScanError>
where
    C: Cursor<'a>,
    S: ValueSink + ?Sized,
{
    let mut levels = vec![in_struct];
    while let Some(&in_struct) = levels.last() {
        if cursor.next()?.is_some() {
            if let Step::Enter { in_struct } = dispatcher.consume_node(cursor, in_struct)? {
                cursor.step_in()?;
                levels.push(in_struct);
            }
        } else {
            levels.pop();
            if !levels.is_empty() {
                cursor.step_out()?;
            }
        }
    }
    Ok(())
}
