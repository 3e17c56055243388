//! Key flattener
//!
//! Multi-line entries are stored in JSON as one key per line: `key1`,
//! `key2`, ... in display order.

use super::escape::unescape;
use crate::formats::lang::{FlatMap, LangMap, LangValue};

/// How list values are turned into flat keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenMode {
    /// Every line gets a 1-based index suffix, even when there is only one.
    #[default]
    Indexed,
    /// Single-line lists keep the bare key; longer lists are indexed.
    CollapseSingle,
}

impl FlattenMode {
    /// Map the `--flatten-single-lines` switch to a mode.
    #[must_use]
    pub fn from_flag(flatten_single_lines: bool) -> Self {
        if flatten_single_lines {
            Self::CollapseSingle
        } else {
            Self::Indexed
        }
    }
}

/// Flatten a language map into key/string pairs, unescaping every value.
///
/// Output keeps the source order, with the lines of a list in place of the
/// list itself. An empty list produces no entries.
#[must_use]
pub fn flatten(map: &LangMap, mode: FlattenMode) -> FlatMap {
    let mut flat = FlatMap::with_capacity(map.len());

    for (key, value) in map {
        match value {
            LangValue::Text(text) => {
                flat.insert(key.clone(), unescape(text));
            }
            LangValue::Lines(lines) if lines.len() == 1 && mode == FlattenMode::CollapseSingle => {
                flat.insert(key.clone(), unescape(&lines[0]));
            }
            LangValue::Lines(lines) => {
                if lines.is_empty() {
                    tracing::debug!("Key '{key}' has an empty list, nothing to flatten");
                }
                for (index, line) in lines.iter().enumerate() {
                    flat.insert(format!("{key}{}", index + 1), unescape(line));
                }
            }
        }
    }

    flat
}
