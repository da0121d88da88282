//! Read tasks.
//!
//! A [`ReadTask`] owns the prepared input of one document and knows how to
//! read it in each supported way. [`ReadTask::run`] picks the read the policy
//! asks for.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use docscan_cursor::{Cursor, ElementCursor, ReaderBuilder};
use docscan_element::ElementArena;
use docscan_path::PathSet;
use tracing::debug;

use crate::ScanError;
use crate::config::{ConsumptionPolicy, ReadMode, ReaderKind, SourceKind, TaskKind};
use crate::convert::convert_input;
use crate::dispatch::ValueDispatcher;
use crate::filtered::traverse_paths;
use crate::loader::ElementLoader;
use crate::sink::{Value, ValueSink};
use crate::traversal::fully_traverse;
use crate::window::initial_window_size;

/// Input and reader configuration prepared once per document.
#[derive(Debug, Clone)]
pub struct TaskSetup {
    policy: ConsumptionPolicy,
    paths: Option<PathSet>,
    input: Vec<u8>,
    builder: ReaderBuilder,
}

impl TaskSetup {
    /// Compiles the search paths, converts the input and sizes the reader.
    pub fn new(policy: ConsumptionPolicy, input: Vec<u8>) -> Result<Self, ScanError> {
        let paths = policy.paths.as_ref().map(PathSet::parse_all).transpose()?;

        let converted = match convert_input(policy.format, &input)? {
            Cow::Owned(bytes) => Some(bytes),
            Cow::Borrowed(_) => None,
        };
        let input = converted.unwrap_or(input);

        let incremental = policy.reader == ReaderKind::Incremental;
        let window = if incremental {
            initial_window_size(policy.initial_window_size, input.len())
        } else {
            None
        };
        let builder = ReaderBuilder::new()
            .incremental(incremental)
            .with_initial_window(window);

        debug!(
            "Prepared {} input bytes (format: {:?}, reader: {:?}, window: {:?})",
            input.len(),
            policy.format,
            policy.reader,
            builder.window_size()
        );
        if let Some(paths) = &paths {
            debug!("Compiled {} search paths", paths.len());
        }

        Ok(Self {
            policy,
            paths,
            input,
            builder,
        })
    }

    /// Reads `path` and prepares it.
    pub fn from_file(policy: ConsumptionPolicy, path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let input = fs::read(path).map_err(|e| {
            ScanError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", path.display(), e),
            ))
        })?;
        Self::new(policy, input)
    }

    pub fn policy(&self) -> &ConsumptionPolicy {
        &self.policy
    }

    /// Compiled search paths, if any were configured.
    pub fn paths(&self) -> Option<&PathSet> {
        self.paths.as_ref()
    }

    /// The input after format conversion.
    pub fn input(&self) -> &[u8] {
        &self.input
    }

    /// Stream window capacity, `None` for the reader default.
    pub fn window_size(&self) -> Option<usize> {
        self.builder.window_size()
    }

    fn require_paths(&self, operation: &str) -> Result<&PathSet, ScanError> {
        self.paths
            .as_ref()
            .ok_or_else(|| ScanError::unsupported(format!("{} without search paths", operation)))
    }

    /// The input as a byte stream.
    fn stream(&self) -> io::Cursor<&[u8]> {
        io::Cursor::new(self.input.as_slice())
    }
}

/// One way of reading a prepared document.
///
/// Every operation allocates its own arena, cursor and chunk buffer, so a task
/// can be run any number of times. Operations a task does not support fail
/// with [`ScanError::UnsupportedOperation`].
pub trait ReadTask {
    fn setup(&self) -> &TaskSetup;

    /// Visits every value of the in-memory input.
    fn fully_traverse_from_buffer(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("fully_traverse_from_buffer"))
    }

    /// Visits every value of the input read as a stream.
    fn fully_traverse_from_stream(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("fully_traverse_from_stream"))
    }

    /// Visits the values selected by the search paths of the in-memory input.
    fn traverse_paths_from_buffer(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("traverse_paths_from_buffer"))
    }

    /// Visits the values selected by the search paths of the streamed input.
    fn traverse_paths_from_stream(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("traverse_paths_from_stream"))
    }

    /// Materializes the in-memory input and hands the tree to the sink.
    fn read_dom_from_buffer(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("read_dom_from_buffer"))
    }

    /// Materializes the streamed input and hands the tree to the sink.
    fn read_dom_from_stream(&self, _sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        Err(ScanError::unsupported("read_dom_from_stream"))
    }

    /// Runs the read selected by the policy.
    fn run(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let setup = self.setup();
        let policy = setup.policy();
        let filtered = setup.paths().is_some();
        debug!(
            "Running {:?} read from {:?} (paths: {})",
            policy.mode, policy.source, filtered
        );

        match (policy.mode, policy.source) {
            (ReadMode::Dom, SourceKind::Buffer) => self.read_dom_from_buffer(sink),
            (ReadMode::Dom, SourceKind::Stream) => self.read_dom_from_stream(sink),
            (ReadMode::Traverse, SourceKind::Buffer) if filtered => {
                self.traverse_paths_from_buffer(sink)
            }
            (ReadMode::Traverse, SourceKind::Stream) if filtered => {
                self.traverse_paths_from_stream(sink)
            }
            (ReadMode::Traverse, SourceKind::Buffer) => self.fully_traverse_from_buffer(sink),
            (ReadMode::Traverse, SourceKind::Stream) => self.fully_traverse_from_stream(sink),
        }
    }
}

/// Creates the task kind the policy asks for.
pub fn new_task(setup: TaskSetup) -> Box<dyn ReadTask> {
    match setup.policy().task {
        TaskKind::Cursor => Box::new(CursorTask::new(setup)),
        TaskKind::Element => Box::new(ElementTask::new(setup)),
    }
}

/// Visits every value of the cursor's document, then closes the cursor.
fn scan_all<'a, C: Cursor<'a>>(
    policy: &ConsumptionPolicy,
    cursor: &mut C,
    sink: &mut dyn ValueSink,
) -> Result<(), ScanError> {
    fully_traverse(&mut ValueDispatcher::new(policy, sink), cursor, false)?;
    cursor.close()?;
    Ok(())
}

fn scan_paths<'a, C: Cursor<'a>>(
    policy: &ConsumptionPolicy,
    paths: &PathSet,
    cursor: &mut C,
    sink: &mut dyn ValueSink,
) -> Result<(), ScanError> {
    traverse_paths(paths, &mut ValueDispatcher::new(policy, sink), cursor)?;
    cursor.close()?;
    Ok(())
}

fn load_dom<'a, C: Cursor<'a>>(
    arena: &ElementArena,
    cursor: &mut C,
    sink: &mut dyn ValueSink,
) -> Result<(), ScanError> {
    let document = ElementLoader::new(arena).load_all(cursor)?;
    cursor.close()?;
    sink.consume(Value::Document(document));
    Ok(())
}

/// Reads straight from a cursor. Supports every operation.
#[derive(Debug, Clone)]
pub struct CursorTask {
    setup: TaskSetup,
}

impl CursorTask {
    pub fn new(setup: TaskSetup) -> Self {
        Self { setup }
    }
}

impl ReadTask for CursorTask {
    fn setup(&self) -> &TaskSetup {
        &self.setup
    }

    fn fully_traverse_from_buffer(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_buffer(&arena, self.setup.input());
        scan_all(self.setup.policy(), &mut cursor, sink)
    }

    fn fully_traverse_from_stream(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_stream(&arena, self.setup.stream());
        scan_all(self.setup.policy(), &mut cursor, sink)
    }

    fn traverse_paths_from_buffer(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let paths = self.setup.require_paths("traverse_paths_from_buffer")?;
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_buffer(&arena, self.setup.input());
        scan_paths(self.setup.policy(), paths, &mut cursor, sink)
    }

    fn traverse_paths_from_stream(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let paths = self.setup.require_paths("traverse_paths_from_stream")?;
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_stream(&arena, self.setup.stream());
        scan_paths(self.setup.policy(), paths, &mut cursor, sink)
    }

    fn read_dom_from_buffer(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_buffer(&arena, self.setup.input());
        load_dom(&arena, &mut cursor, sink)
    }

    fn read_dom_from_stream(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_stream(&arena, self.setup.stream());
        load_dom(&arena, &mut cursor, sink)
    }
}

/// Reads through a materialized document.
///
/// Supports DOM reads from either source and path traversal over a document
/// loaded from the buffer.
#[derive(Debug, Clone)]
pub struct ElementTask {
    setup: TaskSetup,
}

impl ElementTask {
    pub fn new(setup: TaskSetup) -> Self {
        Self { setup }
    }
}

impl ReadTask for ElementTask {
    fn setup(&self) -> &TaskSetup {
        &self.setup
    }

    fn traverse_paths_from_buffer(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let paths = self.setup.require_paths("traverse_paths_from_buffer")?;
        let arena = ElementArena::new();
        let mut reader = self.setup.builder.build_from_buffer(&arena, self.setup.input());
        let document = ElementLoader::new(&arena).load_all(&mut reader)?;
        reader.close()?;

        let mut cursor = ElementCursor::over_elements(document);
        scan_paths(self.setup.policy(), paths, &mut cursor, sink)
    }

    fn read_dom_from_buffer(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_buffer(&arena, self.setup.input());
        load_dom(&arena, &mut cursor, sink)
    }

    fn read_dom_from_stream(&self, sink: &mut dyn ValueSink) -> Result<(), ScanError> {
        let arena = ElementArena::new();
        let mut cursor = self.setup.builder.build_from_stream(&arena, self.setup.stream());
        load_dom(&arena, &mut cursor, sink)
    }
}
