//! # docscan_core
//!
//! Traversal and dispatch engine for docscan.
//!
//! This crate provides:
//! - [`ValueDispatcher`], which hands every decoded value of a node to a [`ValueSink`]
//! - [`fully_traverse`] and [`traverse_paths`], the two scan-only engines
//! - [`ElementLoader`], which materializes a document into an arena
//! - [`ReadTask`] implementations that pick a read from a [`ConsumptionPolicy`]
//!
//! ## Example
//!
//! ```rust
//! use docscan_core::{ChecksumSink, ConsumptionPolicy, TaskSetup, new_task};
//!
//! let setup = TaskSetup::new(ConsumptionPolicy::default(), br#"{"a": [1, 2]}"#.to_vec())?;
//! let task = new_task(setup);
//!
//! let mut sink = ChecksumSink::new();
//! task.run(&mut sink)?;
//! assert_eq!(sink.values(), 3);
//! # Ok::<(), docscan_core::ScanError>(())
//! ```

mod config;
mod convert;
mod dispatch;
mod error;
mod filtered;
mod loader;
mod sink;
mod task;
mod traversal;
mod window;

pub use config::{
    CONFIG_FILES, ConsumptionPolicy, DecimalRepresentation, InputFormat, LargeObjectStrategy,
    ReadMode, ReaderKind, SourceKind, SymbolRepresentation, TaskKind,
};
pub use convert::convert_input;
pub use dispatch::{LOB_CHUNK_SIZE, Step, ValueDispatcher};
pub use error::ScanError;
pub use filtered::traverse_paths;
pub use loader::ElementLoader;
pub use sink::{ChecksumSink, Recorded, RecordingSink, SinkReport, Value, ValueSink};
pub use task::{CursorTask, ElementTask, ReadTask, TaskSetup, new_task};
pub use traversal::fully_traverse;
pub use window::{DEFAULT_INCREMENTAL_WINDOW_SIZE, initial_window_size, next_power_of_two};

#[cfg(test)]
pub mod test_utils;
