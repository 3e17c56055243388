//! JSON language artifacts

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, PrettyFormatter};

use super::{LangMap, LangValue};
use crate::error::{Error, Result};

/// Read a JSON language file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or is not
/// a JSON object.
pub fn read_lang_json<P: AsRef<Path>>(path: P) -> Result<LangMap> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
    parse_object(&content, path)
}

/// Parse JSON language text.
///
/// A leading BOM is ignored and key order is preserved. Strings become
/// [`LangValue::Text`], arrays become [`LangValue::Lines`]; any other scalar
/// is converted to its JSON text with a warning.
///
/// # Errors
/// Returns an error if the text is not a JSON object.
pub fn parse_lang_json(content: &str) -> Result<LangMap> {
    parse_object(content, Path::new("<memory>"))
}

fn parse_object(content: &str, origin: &Path) -> Result<LangMap> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Value::Object(object) = serde_json::from_str::<Value>(content)? else {
        return Err(Error::LangFileNotObject {
            path: origin.to_path_buf(),
        });
    };

    let mut map = LangMap::with_capacity(object.len());
    for (key, value) in object {
        let lang_value = match value {
            Value::String(text) => LangValue::Text(text),
            Value::Array(items) => LangValue::Lines(
                items
                    .into_iter()
                    .map(|item| scalar_to_string(&key, item, origin))
                    .collect(),
            ),
            other => LangValue::Text(scalar_to_string(&key, other, origin)),
        };
        map.insert(key, lang_value);
    }
    Ok(map)
}

fn scalar_to_string(key: &str, value: Value, origin: &Path) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => {
            tracing::warn!("{}: key '{key}' is null, using an empty string", origin.display());
            String::new()
        }
        other => {
            tracing::warn!(
                "{}: key '{key}' holds a non-string value {other}, storing it as text",
                origin.display()
            );
            other.to_string()
        }
    }
}

/// Serialize to JSON with 4-space indentation; non-ASCII is written verbatim.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serialize_with(value, PrettyFormatter::with_indent(INDENT))
}

/// Like [`to_json_string`], but keys are followed by a bare `:` (`"k":"v"`).
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json_string_compact_keys<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serialize_with(value, CompactKeyFormatter(PrettyFormatter::with_indent(INDENT)))
}

const INDENT: &[u8] = b"    ";

fn serialize_with<T: Serialize + ?Sized, F: Formatter>(value: &T, formatter: F) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// [`PrettyFormatter`] without the space after an object key.
struct CompactKeyFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for CompactKeyFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b":")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

/// Write a JSON language artifact, creating parent directories.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_lang_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    write_text(path.as_ref(), &to_json_string(value)?)
}

/// Write a JSON file in the [`to_json_string_compact_keys`] layout, creating
/// parent directories.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_lang_json_compact_keys<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    write_text(path.as_ref(), &to_json_string_compact_keys(value)?)
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::file_io(path, e))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::formats::lang::FlatMap;

    #[test]
    fn test_parse_preserves_order_and_shapes() {
        let map = parse_lang_json("\u{feff}{\"b\": \"x\", \"a\": [\"1\", \"2\"], \"n\": 5}").unwrap();

        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "n"]);
        assert_eq!(map["a"], LangValue::Lines(vec!["1".into(), "2".into()]));
        assert_eq!(map["n"], LangValue::from("5"));
    }

    #[test]
    fn test_parse_rejects_array_root() {
        assert!(matches!(
            parse_lang_json("[1, 2]"),
            Err(Error::LangFileNotObject { .. })
        ));
    }

    #[test]
    fn test_json_layout() {
        let mut map = FlatMap::new();
        map.insert("quest.AB.title".to_string(), "你好".to_string());
        map.insert("x".to_string(), "\"q\"".to_string());

        let text = to_json_string(&map).unwrap();
        assert_eq!(
            text,
            "{\n    \"quest.AB.title\": \"你好\",\n    \"x\": \"\\\"q\\\"\"\n}"
        );
    }

    #[test]
    fn test_compact_key_layout() {
        let mut map = FlatMap::new();
        map.insert("k".to_string(), "v".to_string());
        map.insert("lines".to_string(), "a: b".to_string());
        let nested = serde_json::json!({"outer": {"list": ["x", "y"]}, "empty": {}});

        assert_eq!(
            to_json_string_compact_keys(&map).unwrap(),
            "{\n    \"k\":\"v\",\n    \"lines\":\"a: b\"\n}"
        );
        assert_eq!(
            to_json_string_compact_keys(&nested).unwrap(),
            "{\n    \"outer\":{\n        \"list\":[\n            \"x\",\n            \"y\"\n        ]\n    },\n    \"empty\":{}\n}"
        );
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("en_us_test.json");
        let mut map = FlatMap::new();
        map.insert("k1".to_string(), "v".to_string());

        write_lang_json(&path, &map).unwrap();
        let loaded = read_lang_json(&path).unwrap();
        assert_eq!(loaded["k1"], LangValue::from("v"));
    }
}
