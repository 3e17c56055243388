//! Turning fetched translations into repository files

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;

use super::types::TranslationItem;
use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::formats::lang::write_lang_json_compact_keys;

/// Key order of a written translation file, decided once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOrder {
    /// The source file was read: write exactly its keys, in its order.
    OrderedBySource(Vec<String>),
    /// No source file: write every key, sorted.
    OrderedAlphabetically,
}

/// Translations of one file merged over its source-language contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFile {
    pub entries: IndexMap<String, Value>,
    pub order: KeyOrder,
}

impl ProcessedFile {
    /// Entries in output order.
    #[must_use]
    pub fn ordered(&self) -> IndexMap<String, Value> {
        match &self.order {
            KeyOrder::OrderedBySource(keys) => keys
                .iter()
                .filter_map(|key| self.entries.get(key).map(|value| (key.clone(), value.clone())))
                .collect(),
            KeyOrder::OrderedAlphabetically => {
                let mut sorted = self.entries.clone();
                sorted.sort_keys();
                sorted
            }
        }
    }
}

/// Read the source-language JSON object of a remote file, if it exists.
///
/// # Errors
/// Returns an error if the file exists but is not a JSON object.
pub fn load_source(path: &Path) -> Result<Option<IndexMap<String, Value>>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::file_io(path, e)),
    };
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    match serde_json::from_str::<Value>(content)? {
        Value::Object(object) => Ok(Some(object.into_iter().collect())),
        _ => Err(Error::LangFileNotObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Merge fetched items over the source contents.
///
/// Every value has `\"` turned into `"`. In quest files (remote path
/// containing the quest marker) spaces become U+00A0 unless the value
/// contains the image marker.
#[must_use]
pub fn process_translation(
    items: &[TranslationItem],
    remote_path: &str,
    source: Option<IndexMap<String, Value>>,
    config: &SyncConfig,
) -> ProcessedFile {
    let is_quest_file = remote_path.contains(&config.quest_marker);
    let (mut entries, order) = match source {
        Some(source) => {
            let keys = source.keys().cloned().collect();
            (source, KeyOrder::OrderedBySource(keys))
        }
        None => (IndexMap::new(), KeyOrder::OrderedAlphabetically),
    };

    for item in items {
        let mut text = item.resolved_text().replace("\\\"", "\"");
        if is_quest_file && !text.contains(&config.image_marker) {
            text = text.replace(' ', "\u{00A0}");
        }
        entries.insert(item.key.clone(), Value::String(text));
    }

    ProcessedFile { entries, order }
}

/// Where a remote file is written: `<output_root>/<parent>/<name>` with the
/// source language replaced by the target language in the file name.
///
/// # Errors
/// Returns [`Error::UnsafeRemotePath`] for absolute paths or paths with `..`.
pub fn output_path(remote_path: &str, config: &SyncConfig) -> Result<PathBuf> {
    let relative = Path::new(remote_path);
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
    {
        return Err(Error::UnsafeRemotePath(remote_path.to_string()));
    }
    let file_name = relative
        .file_name()
        .ok_or_else(|| Error::UnsafeRemotePath(remote_path.to_string()))?
        .to_string_lossy()
        .replace(&config.source_lang, &config.target_lang);

    let parent = relative.parent().unwrap_or(Path::new(""));
    Ok(config.output_root.join(parent).join(file_name))
}

/// Write a processed file with 4-space indentation and `"key":"value"` pairs.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_translation(processed: &ProcessedFile, path: &Path) -> Result<usize> {
    let ordered = processed.ordered();
    write_lang_json_compact_keys(path, &ordered)?;
    Ok(ordered.len())
}
