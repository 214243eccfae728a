/// JSON renderers: four-space indentation and spaced single-line output.
use std::io;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::{Formatter, PrettyFormatter};

const INDENT: &[u8] = b"    ";

/// Single-line formatter that separates items with `", "` and keys with `": "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Render `value` indented by four spaces.
///
/// # Errors
///
/// Returns the serializer error if `value` cannot be represented as JSON.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render `value` on one line with spaced separators.
///
/// # Errors
///
/// Returns the serializer error if `value` cannot be represented as JSON.
pub fn to_spaced_string<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SessionRunsOutput, SummaryOutput};

    fn summary(subjects: &[&str], sessions: &[&str]) -> SummaryOutput {
        SummaryOutput {
            subjects: subjects.iter().map(|&s| s.to_owned()).collect(),
            sessions: sessions.iter().map(|&s| s.to_owned()).collect(),
        }
    }

    #[test]
    fn test_spaced_summary() {
        let value = summary(&["01"], &["pre", "post"]);
        assert_eq!(
            to_spaced_string(&value).unwrap(),
            r#"{"subjects": ["01"], "sessions": ["pre", "post"]}"#
        );
    }

    #[test]
    fn test_spaced_empty_collections() {
        let value = summary(&[], &[]);
        assert_eq!(
            to_spaced_string(&value).unwrap(),
            r#"{"subjects": [], "sessions": []}"#
        );
    }

    #[test]
    fn test_pretty_four_space_indent() {
        let value = vec![SessionRunsOutput {
            subject: "01".to_owned(),
            session: "pre".to_owned(),
            runs: vec![None],
        }];
        let expected = "[\n    {\n        \"subject\": \"01\",\n        \"session\": \"pre\",\n        \"runs\": [\n            null\n        ]\n    }\n]";
        assert_eq!(to_pretty_string(&value).unwrap(), expected);
    }

    #[test]
    fn test_pretty_empty_array() {
        let empty: Vec<SessionRunsOutput> = Vec::new();
        assert_eq!(to_pretty_string(&empty).unwrap(), "[]");
    }
}
