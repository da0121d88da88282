//! End-to-end tests for read tasks
//!
//! Reads fixture documents through every task kind, source and mode and checks
//! that equivalent reads deliver equivalent values.

use std::path::PathBuf;

use docscan_core::{
    ChecksumSink, ConsumptionPolicy, ElementLoader, InputFormat, ReadMode, ReaderKind, Recorded,
    RecordingSink, ScanError, SinkReport, SourceKind, TaskKind, TaskSetup, ValueDispatcher,
    fully_traverse, new_task,
};
use docscan_cursor::{ElementCursor, ReaderBuilder};
use docscan_element::ElementArena;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn checksum(policy: ConsumptionPolicy) -> Result<SinkReport, ScanError> {
    let setup = TaskSetup::from_file(policy, fixture("catalog.json"))?;
    let mut sink = ChecksumSink::new();
    new_task(setup).run(&mut sink)?;
    Ok(sink.report())
}

fn record(policy: ConsumptionPolicy) -> Vec<Recorded> {
    let setup = TaskSetup::from_file(policy, fixture("catalog.json")).unwrap();
    let mut sink = RecordingSink::new();
    new_task(setup).run(&mut sink).unwrap();
    sink.into_values()
}

#[rstest]
#[case::stream(SourceKind::Stream, ReaderKind::Incremental, None)]
#[case::tiny_window(SourceKind::Stream, ReaderKind::Incremental, Some(1))]
#[case::non_incremental(SourceKind::Stream, ReaderKind::NonIncremental, None)]
#[case::buffer_non_incremental(SourceKind::Buffer, ReaderKind::NonIncremental, None)]
fn full_traversal_is_independent_of_reader(
    #[case] source: SourceKind,
    #[case] reader: ReaderKind,
    #[case] initial_window_size: Option<usize>,
) {
    let expected = checksum(ConsumptionPolicy::default()).unwrap();
    let actual = checksum(ConsumptionPolicy {
        source,
        reader,
        initial_window_size,
        ..ConsumptionPolicy::default()
    })
    .unwrap();

    assert_eq!(actual, expected);
}

#[rstest]
#[case::compact(InputFormat::CompactJson)]
#[case::pretty(InputFormat::PrettyJson)]
fn input_format_does_not_change_values(#[case] format: InputFormat) {
    let expected = checksum(ConsumptionPolicy::default()).unwrap();
    let actual = checksum(ConsumptionPolicy {
        format,
        ..ConsumptionPolicy::default()
    })
    .unwrap();

    assert_eq!(actual, expected);
}

#[test]
fn materialized_document_traverses_like_the_source() {
    let input = std::fs::read(fixture("catalog.json")).unwrap();
    let policy = ConsumptionPolicy::default();

    let arena = ElementArena::new();
    let mut reader = ReaderBuilder::new().build_from_buffer(&arena, &input);
    let document = ElementLoader::new(&arena).load_all(&mut reader).unwrap();
    assert_eq!(document.len(), 2);

    let mut from_dom = ChecksumSink::new();
    let mut cursor = ElementCursor::over_elements(document);
    fully_traverse(&mut ValueDispatcher::new(&policy, &mut from_dom), &mut cursor, false).unwrap();

    assert_eq!(from_dom.report(), checksum(policy).unwrap());
}

#[test]
fn path_traversal_selects_every_match() {
    let values = record(ConsumptionPolicy {
        paths: Some(vec!["items.v".to_string(), "items.stock.store".to_string()]),
        ..ConsumptionPolicy::default()
    });

    let strings: Vec<&str> = values
        .iter()
        .filter_map(|value| match value {
            Recorded::Str(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        strings,
        vec!["v", "alpha", "v", "beta", "v", "gamma", "store"]
    );
    assert_eq!(values.last(), Some(&Recorded::I32(2)));
}

#[rstest]
#[case::cursor(TaskKind::Cursor)]
#[case::element(TaskKind::Element)]
fn path_traversal_agrees_across_tasks(#[case] task: TaskKind) {
    let policy = ConsumptionPolicy {
        task,
        paths: Some(vec!["items[0].tags".to_string(), "active".to_string()]),
        ..ConsumptionPolicy::default()
    };

    let values = record(policy);

    assert_eq!(
        values,
        vec![
            Recorded::Str("tags".to_string()),
            Recorded::Str("new".to_string()),
            Recorded::Str("sale".to_string()),
            Recorded::Str("active".to_string()),
            Recorded::Bool(true),
        ]
    );
}

#[test]
fn integers_are_narrowed() {
    let values = record(ConsumptionPolicy {
        paths: Some(vec!["version".to_string(), "serial".to_string(), "offset".to_string()]),
        ..ConsumptionPolicy::default()
    });

    assert_eq!(
        values,
        vec![
            Recorded::Str("version".to_string()),
            Recorded::I32(3),
            Recorded::Str("serial".to_string()),
            Recorded::BigInt(BigInt::from(u64::MAX)),
            Recorded::Str("offset".to_string()),
            Recorded::I64(i64::MIN),
        ]
    );
}

#[rstest]
#[case::cursor_buffer(TaskKind::Cursor, SourceKind::Buffer)]
#[case::cursor_stream(TaskKind::Cursor, SourceKind::Stream)]
#[case::element_buffer(TaskKind::Element, SourceKind::Buffer)]
#[case::element_stream(TaskKind::Element, SourceKind::Stream)]
fn dom_reads_agree(#[case] task: TaskKind, #[case] source: SourceKind) {
    let expected = checksum(ConsumptionPolicy {
        mode: ReadMode::Dom,
        ..ConsumptionPolicy::default()
    })
    .unwrap();

    let actual = checksum(ConsumptionPolicy {
        mode: ReadMode::Dom,
        task,
        source,
        ..ConsumptionPolicy::default()
    })
    .unwrap();

    assert_eq!(actual, expected);
    assert_eq!(actual.values, 1);
}

#[rstest]
#[case::full_buffer(SourceKind::Buffer, None)]
#[case::full_stream(SourceKind::Stream, None)]
#[case::paths_stream(SourceKind::Stream, Some(vec!["name".to_string()]))]
fn element_task_rejects_cursor_only_reads(
    #[case] source: SourceKind,
    #[case] paths: Option<Vec<String>>,
) {
    let result = checksum(ConsumptionPolicy {
        task: TaskKind::Element,
        source,
        paths,
        ..ConsumptionPolicy::default()
    });

    assert!(matches!(result, Err(ScanError::UnsupportedOperation(_))));
}

#[test]
fn policy_file_drives_the_read() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".docscan.jsonc"),
        r#"{
  // stream the document, keep only names
  "source": "stream",
  "paths": ["name"],
  "initialWindowSize": 64
}"#,
    )
    .unwrap();

    let path = ConsumptionPolicy::discover(dir.path()).unwrap();
    let policy = ConsumptionPolicy::from_file(path).unwrap();
    let setup = TaskSetup::from_file(policy, fixture("catalog.json")).unwrap();
    assert_eq!(setup.window_size(), Some(64));

    let mut sink = RecordingSink::new();
    new_task(setup).run(&mut sink).unwrap();

    assert_eq!(
        sink.into_values(),
        vec![
            Recorded::Str("name".to_string()),
            Recorded::Str("catalog".to_string()),
            Recorded::Str("name".to_string()),
            Recorded::Str("trailer".to_string()),
        ]
    );
}

#[test]
fn nested_documents_within_decoder_limits() {
    let depth = 100;
    let document = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
    let setup = TaskSetup::new(ConsumptionPolicy::default(), document.into_bytes()).unwrap();

    let mut sink = RecordingSink::new();
    new_task(setup).run(&mut sink).unwrap();

    assert_eq!(sink.values(), &[Recorded::I32(1)]);
}
