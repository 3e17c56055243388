//! SNBT writer producing the FTB Quests layout

use std::fmt::Write as _;
use std::path::Path;

use super::document::SnbtValue;
use crate::error::{Error, Result};

/// Serialize a value to SNBT text in FTB layout.
///
/// Tab indentation, one entry per line, no separating commas. Keys made only
/// of `[A-Za-z0-9._+-]` are written bare, others are double-quoted. The output
/// ends with a newline.
#[must_use]
pub fn to_snbt_string(value: &SnbtValue) -> String {
    let mut output = String::new();
    write_value(&mut output, value, 0);
    output.push('\n');
    output
}

/// Write a value to an SNBT file, creating parent directories.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_snbt<P: AsRef<Path>>(path: P, value: &SnbtValue) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_io(parent, e))?;
    }
    std::fs::write(path, to_snbt_string(value)).map_err(|e| Error::file_io(path, e))
}

fn write_value(output: &mut String, value: &SnbtValue, depth: usize) {
    match value {
        SnbtValue::Compound(map) => {
            if map.is_empty() {
                output.push_str("{ }");
                return;
            }
            output.push_str("{\n");
            for (key, child) in map {
                indent(output, depth + 1);
                write_key(output, key);
                output.push_str(": ");
                write_value(output, child, depth + 1);
                output.push('\n');
            }
            indent(output, depth);
            output.push('}');
        }
        SnbtValue::List(items) => {
            if items.is_empty() {
                output.push_str("[ ]");
                return;
            }
            output.push_str("[\n");
            for item in items {
                indent(output, depth + 1);
                write_value(output, item, depth + 1);
                output.push('\n');
            }
            indent(output, depth);
            output.push(']');
        }
        SnbtValue::TypedArray { kind, items } => {
            let _ = write!(output, "[{kind}; {}]", items.join(", "));
        }
        SnbtValue::String(raw) => {
            output.push('"');
            output.push_str(raw);
            output.push('"');
        }
        SnbtValue::Literal(raw) => output.push_str(raw),
    }
}

fn write_key(output: &mut String, key: &str) {
    if is_bare_key(key) {
        output.push_str(key);
    } else {
        output.push('"');
        output.push_str(key);
        output.push('"');
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
}

fn indent(output: &mut String, depth: usize) {
    for _ in 0..depth {
        output.push('\t');
    }
}
