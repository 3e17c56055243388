//! Language data model
//!
//! A language file maps dotted keys such as `quest.3F2A.title` to either a
//! single line of text or an ordered list of lines. [`LangMap`] holds that
//! shape as read from SNBT; [`FlatMap`] is the string-only form used by the
//! JSON artifacts handed to translators.

mod json;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formats::snbt::SnbtValue;

pub use json::{
    parse_lang_json, read_lang_json, to_json_string, to_json_string_compact_keys, write_lang_json,
    write_lang_json_compact_keys,
};

/// A language entry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LangValue {
    /// A single line.
    Text(String),
    /// Several lines, in display order.
    Lines(Vec<String>),
}

impl From<&str> for LangValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LangValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for LangValue {
    fn from(value: Vec<String>) -> Self {
        Self::Lines(value)
    }
}

/// Key to text-or-lines, in file order.
pub type LangMap = IndexMap<String, LangValue>;

/// Key to single string, in file order.
pub type FlatMap = IndexMap<String, String>;

/// Convert a parsed SNBT language file into a [`LangMap`].
///
/// String contents are taken raw (still escaped).
///
/// # Errors
/// Returns an error if the root is not a compound or if any entry is not a
/// string or a list of strings.
pub fn lang_map_from_snbt(value: &SnbtValue) -> Result<LangMap> {
    let root = value.as_compound().ok_or(Error::SnbtRootNotCompound {
        found: value.kind_name(),
    })?;

    let mut map = LangMap::with_capacity(root.len());
    for (key, entry) in root {
        let lang_value = match entry {
            SnbtValue::String(text) => LangValue::Text(text.clone()),
            SnbtValue::List(items) => {
                let lines = items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| Error::UnsupportedLangValue {
                                key: key.clone(),
                                found: item.kind_name(),
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                LangValue::Lines(lines)
            }
            other => {
                return Err(Error::UnsupportedLangValue {
                    key: key.clone(),
                    found: other.kind_name(),
                });
            }
        };
        map.insert(key.clone(), lang_value);
    }
    Ok(map)
}

/// Convert a [`LangMap`] into an SNBT compound ready to be written.
///
/// Values are written raw, so they must already be escaped.
#[must_use]
pub fn lang_map_to_snbt(map: &LangMap) -> SnbtValue {
    let compound = map
        .iter()
        .map(|(key, value)| {
            let snbt = match value {
                LangValue::Text(text) => SnbtValue::String(text.clone()),
                LangValue::Lines(lines) => {
                    SnbtValue::List(lines.iter().cloned().map(SnbtValue::String).collect())
                }
            };
            (key.clone(), snbt)
        })
        .collect();
    SnbtValue::Compound(compound)
}
