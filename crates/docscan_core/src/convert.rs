//! Input preparation.
//!
//! Re-encodes input documents into the textual form a read runs against.

use std::borrow::Cow;

use docscan_cursor::CursorError;
use serde_json::{Deserializer, Value};

use crate::ScanError;
use crate::config::InputFormat;

/// Returns the bytes a read should run against.
///
/// [`InputFormat::Json`] reads the input as given. The compact and pretty
/// formats re-serialize every top-level value, one per line.
pub fn convert_input(format: InputFormat, input: &[u8]) -> Result<Cow<'_, [u8]>, ScanError> {
    let pretty = match format {
        InputFormat::Json => return Ok(Cow::Borrowed(input)),
        InputFormat::CompactJson => false,
        InputFormat::PrettyJson => true,
    };

    let mut output = Vec::with_capacity(input.len());
    let mut stream = Deserializer::from_slice(input).into_iter::<Value>();
    while let Some(value) = stream.next() {
        let value = value.map_err(|e| {
            ScanError::MalformedDocument(CursorError::malformed_at(
                e.to_string(),
                stream.byte_offset(),
            ))
        })?;
        if !output.is_empty() {
            output.push(b'\n');
        }
        let written = if pretty {
            serde_json::to_writer_pretty(&mut output, &value)
        } else {
            serde_json::to_writer(&mut output, &value)
        };
        written.map_err(|e| ScanError::MalformedDocument(CursorError::malformed(e.to_string())))?;
    }
    Ok(Cow::Owned(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_is_borrowed() {
        let input = br#"{ "a" : 1 }"#;
        let converted = convert_input(InputFormat::Json, input).unwrap();
        assert!(matches!(converted, Cow::Borrowed(_)));
    }

    #[test]
    fn test_compact_one_value_per_line() {
        let input = b"{ \"a\" : [ 1, 2 ] }\n\n  \"x\"  ";
        let converted = convert_input(InputFormat::CompactJson, input).unwrap();
        assert_eq!(
            String::from_utf8(converted.into_owned()).unwrap(),
            "{\"a\":[1,2]}\n\"x\""
        );
    }

    #[test]
    fn test_pretty_keeps_field_order() {
        let input = br#"{"b": 1, "a": 2}"#;
        let converted = convert_input(InputFormat::PrettyJson, input).unwrap();
        assert_eq!(
            String::from_utf8(converted.into_owned()).unwrap(),
            "{\n  \"b\": 1,\n  \"a\": 2\n}"
        );
    }

    #[test]
    fn test_empty_input() {
        let converted = convert_input(InputFormat::CompactJson, b"  ").unwrap();
        assert!(converted.is_empty());
    }

    #[test]
    fn test_malformed_input() {
        let err = convert_input(InputFormat::CompactJson, b"[1, }").unwrap_err();
        assert!(matches!(
            err,
            ScanError::MalformedDocument(CursorError::Malformed { offset: Some(_), .. })
        ));
    }
}
