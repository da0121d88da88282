//! Initial window sizing for incremental readers.

/// Inputs at least this large keep the reader's default window.
pub const DEFAULT_INCREMENTAL_WINDOW_SIZE: usize = 32 * 1024;

/// Smallest power of two that is at least `max(len, 1)`.
pub fn next_power_of_two(len: usize) -> usize {
    len.max(1).next_power_of_two()
}

/// Chooses the initial window of an incremental reader.
///
/// An explicit override always wins. Otherwise inputs smaller than
/// [`DEFAULT_INCREMENTAL_WINDOW_SIZE`] get a window of the next power of two
/// of their length, and larger inputs get `None` (the reader default).
pub fn initial_window_size(override_size: Option<usize>, input_len: usize) -> Option<usize> {
    if override_size.is_some() {
        return override_size;
    }
    if input_len < DEFAULT_INCREMENTAL_WINDOW_SIZE {
        Some(next_power_of_two(input_len))
    } else {
        None
    }
}
