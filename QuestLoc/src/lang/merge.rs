//! Merge pipeline: JSON language files back into one SNBT file

use std::fmt;
use std::path::{Path, PathBuf};

use super::reconstruct::{escape_lang_map, reconstruct};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::lang::{LangMap, lang_map_to_snbt, read_lang_json};
use crate::formats::snbt::write_snbt;

/// Inputs of a merge run.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub json_dir: PathBuf,
    pub output_snbt: PathBuf,
    /// Only merge files whose name starts with this.
    pub prefix: Option<String>,
}

impl MergeOptions {
    /// Options taken from configuration, merging every JSON file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            json_dir: config.split.output_dir.clone(),
            output_snbt: config.split.output_snbt.clone(),
            prefix: None,
        }
    }
}

/// Outcome of a merge run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub files_loaded: usize,
    pub files_skipped: usize,
    /// Distinct keys across all loaded files.
    pub flat_entries: usize,
    /// Entries written to the SNBT file.
    pub reconstructed_entries: usize,
    pub output: PathBuf,
}

impl MergeReport {
    pub fn summary(&self) -> String {
        format!(
            "{} files merged ({} skipped), {} entries -> {} SNBT entries",
            self.files_loaded, self.files_skipped, self.flat_entries, self.reconstructed_entries
        )
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} into {}", self.summary(), self.output.display())
    }
}

/// Combined contents of a directory of JSON language files.
#[derive(Debug, Clone, Default)]
pub struct LoadedJson {
    pub entries: LangMap,
    pub files_loaded: usize,
    pub files_skipped: usize,
}

/// Load every `*.json` file in `dir` in file-name order.
///
/// Later files override keys of earlier ones. Unreadable or malformed files
/// are skipped with a warning.
///
/// # Errors
/// Returns [`Error::JsonDirNotFound`] if `dir` is not a directory.
pub fn load_json_dir(dir: &Path, prefix: Option<&str>) -> Result<LoadedJson> {
    if !dir.is_dir() {
        return Err(Error::JsonDirNotFound(dir.to_path_buf()));
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| Error::file_io(dir, e))?
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .filter(|name| prefix.is_none_or(|p| name.starts_with(p)))
        .collect();
    names.sort();

    let mut loaded = LoadedJson::default();
    for name in &names {
        let path = dir.join(name);
        match read_lang_json(&path) {
            Ok(entries) => {
                tracing::info!("Loaded {} entries from {name}", entries.len());
                loaded.entries.extend(entries);
                loaded.files_loaded += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping {}: {e}", path.display());
                loaded.files_skipped += 1;
            }
        }
    }
    Ok(loaded)
}

/// Merge a directory of JSON language files into one SNBT file.
///
/// Numbered keys are regrouped into lists, keys are sorted, values escaped.
/// The parent directory of the output is created.
///
/// # Errors
/// Returns [`Error::EmptyMerge`] without writing anything when no entries
/// were loaded, or an IO error if the output cannot be written.
pub fn merge(options: &MergeOptions) -> Result<MergeReport> {
    tracing::info!(
        "Merging JSON files from {} into {}",
        options.json_dir.display(),
        options.output_snbt.display()
    );
    let loaded = load_json_dir(&options.json_dir, options.prefix.as_deref())?;
    if loaded.entries.is_empty() {
        return Err(Error::EmptyMerge {
            dir: options.json_dir.clone(),
        });
    }

    let reconstructed = reconstruct(&loaded.entries)?;
    let snbt = lang_map_to_snbt(&escape_lang_map(&reconstructed));
    write_snbt(&options.output_snbt, &snbt)?;

    let report = MergeReport {
        files_loaded: loaded.files_loaded,
        files_skipped: loaded.files_skipped,
        flat_entries: loaded.entries.len(),
        reconstructed_entries: reconstructed.len(),
        output: options.output_snbt.clone(),
    };
    tracing::info!("Merge complete: {}", report.summary());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::formats::lang::LangValue;

    #[test]
    fn test_later_files_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), r#"{"k": "first", "x": "1"}"#).unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{"k": "second"}"#).unwrap();
        std::fs::write(dir.path().join("c.json"), "not json").unwrap();
        std::fs::write(dir.path().join("d.txt"), r#"{"k": "ignored"}"#).unwrap();

        let loaded = load_json_dir(dir.path(), None).unwrap();
        assert_eq!(loaded.files_loaded, 2);
        assert_eq!(loaded.files_skipped, 1);
        assert_eq!(loaded.entries["k"], LangValue::from("second"));
        assert_eq!(loaded.entries.len(), 2);
    }

    #[test]
    fn test_prefix_filter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en_us_a.json"), r#"{"k": "en"}"#).unwrap();
        std::fs::write(dir.path().join("zh_cn_a.json"), r#"{"k": "zh"}"#).unwrap();

        let loaded = load_json_dir(dir.path(), Some("zh_cn")).unwrap();
        assert_eq!(loaded.files_loaded, 1);
        assert_eq!(loaded.entries["k"], LangValue::from("zh"));
    }

    #[test]
    fn test_empty_merge_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let output = dir.path().join("lang").join("zh_cn.snbt");

        let result = merge(&MergeOptions {
            json_dir: dir.path().to_path_buf(),
            output_snbt: output.clone(),
            prefix: None,
        });
        assert!(matches!(result, Err(Error::EmptyMerge { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_json_dir(&dir.path().join("nope"), None),
            Err(Error::JsonDirNotFound(_))
        ));
    }
}
