//! Pipeline configuration
//!
//! Settings live in an optional `questloc.toml`. Every table and field has a
//! default, so an empty or partial file is valid:
//!
//! ```toml
//! [split]
//! lang = "en_us"
//! output_dir = "output_json"
//!
//! [[split.categories]]
//! file = "{lang}_chapters.json"
//! prefixes = ["chapter_group."]
//!
//! [[sort.order]]
//! namespace = "quest."
//! suffixes = [".title", ".quest_subtitle", ".quest_desc"]
//!
//! [sync]
//! output_root = "CNPack"
//! ```
//!
//! Secrets are never read from this file; see [`crate::sync::Credentials`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "questloc.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub split: SplitConfig,
    pub sort: SortConfig,
    pub sync: SyncConfig,
    pub compare: CompareConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist. Without one, `questloc.toml`
    /// in the working directory is used when present, otherwise defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// ==================== Split / Merge ====================

/// Placeholder in output file names replaced by [`SplitConfig::lang`].
pub const LANG_PLACEHOLDER: &str = "{lang}";

/// One category rule: entries whose key starts with any prefix go to `file`.
///
/// `file` may contain `{lang}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub file: String,
    pub prefixes: Vec<String>,
}

/// Settings for splitting the source SNBT and merging JSON back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Language prefix of generated JSON file names.
    pub lang: String,
    /// Source language file.
    pub source_lang: PathBuf,
    /// Directory of chapter `.snbt` documents.
    pub chapters_dir: PathBuf,
    /// Output directory for split JSON, and input directory for merge.
    pub output_dir: PathBuf,
    /// Merge output.
    pub output_snbt: PathBuf,
    /// Write single-line lists without an index suffix.
    pub flatten_single_lines: bool,
    /// Category table, checked in order after the built-in hierarchy prefixes.
    pub categories: Vec<CategoryConfig>,
    /// File for entries that match no category. May contain `{lang}`.
    pub other_file: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            lang: "en_us".to_string(),
            source_lang: PathBuf::from("lang/en_us.snbt"),
            chapters_dir: PathBuf::from("chapters"),
            output_dir: PathBuf::from("output_json"),
            output_snbt: PathBuf::from("lang/zh_cn.snbt"),
            flatten_single_lines: false,
            categories: vec![
                CategoryConfig {
                    file: "{lang}_chapters.json".to_string(),
                    prefixes: vec!["chapter_group.".to_string()],
                },
                CategoryConfig {
                    file: "{lang}_reward_tables.json".to_string(),
                    prefixes: vec!["reward_table.".to_string()],
                },
            ],
            other_file: "{lang}_other_entries.json".to_string(),
        }
    }
}

impl SplitConfig {
    /// Category table with `{lang}` expanded in file names.
    #[must_use]
    pub fn resolved_categories(&self) -> Vec<CategoryConfig> {
        self.categories
            .iter()
            .map(|category| CategoryConfig {
                file: self.expand_lang(&category.file),
                prefixes: category.prefixes.clone(),
            })
            .collect()
    }

    /// Other-entries file name with `{lang}` expanded.
    #[must_use]
    pub fn resolved_other_file(&self) -> String {
        self.expand_lang(&self.other_file)
    }

    fn expand_lang(&self, name: &str) -> String {
        name.replace(LANG_PLACEHOLDER, &self.lang)
    }
}

// ==================== Sort ====================

/// Preferred field order for one key namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOrder {
    /// Key namespace such as `quest.`.
    pub namespace: String,
    /// Field suffixes in display order, such as `.title`.
    pub suffixes: Vec<String>,
}

/// Ordering of entries inside a chapter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub order: Vec<FieldOrder>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            order: vec![
                FieldOrder {
                    namespace: "chapter.".to_string(),
                    suffixes: vec![".title".to_string(), ".description".to_string()],
                },
                FieldOrder {
                    namespace: "quest.".to_string(),
                    suffixes: vec![
                        ".title".to_string(),
                        ".quest_subtitle".to_string(),
                        ".quest_desc".to_string(),
                    ],
                },
            ],
        }
    }
}

impl SortConfig {
    /// Field order for a namespace, if one is configured.
    #[must_use]
    pub fn suffixes_for(&self, namespace: &str) -> Option<&[String]> {
        self.order
            .iter()
            .find(|order| order.namespace == namespace)
            .map(|order| order.suffixes.as_slice())
    }
}

// ==================== Sync ====================

/// Settings for pulling translations from the translation platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL of the platform API.
    pub api_base: String,
    /// Directory holding the source-language files, mirrored by remote paths.
    pub source_root: PathBuf,
    /// Directory translated files are written under.
    pub output_root: PathBuf,
    pub source_lang: String,
    pub target_lang: String,
    /// Remote files whose name contains this are skipped.
    pub skip_marker: String,
    /// Remote paths containing this get non-breaking spaces.
    pub quest_marker: String,
    /// Values containing this keep their ordinary spaces.
    pub image_marker: String,
    /// Remote paths containing this are FTB Quests lang JSON to merge.
    pub quest_lang_dir_marker: String,
    /// SNBT file the quest lang JSON is merged into.
    pub merged_output: PathBuf,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: "https://paratranz.cn/api".to_string(),
            source_root: PathBuf::from("Source"),
            output_root: PathBuf::from("CNPack"),
            source_lang: "en_us".to_string(),
            target_lang: "zh_cn".to_string(),
            skip_marker: "TM".to_string(),
            quest_marker: "quests".to_string(),
            image_marker: "image".to_string(),
            quest_lang_dir_marker: "kubejs/assets/quests/lang/".to_string(),
            merged_output: PathBuf::from("CNPack/config/ftbquests/quests/lang/zh_cn.snbt"),
            timeout_secs: 60,
        }
    }
}

// ==================== Compare ====================

/// Settings for the release comparison report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Report output path.
    pub output: PathBuf,
    /// Custom HTML template; the bundled one is used when unset.
    pub template: Option<PathBuf>,
    /// Lines of context around each change.
    pub context_lines: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("comparison_report.html"),
            template: None,
            context_lines: 2,
        }
    }
}
