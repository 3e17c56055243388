//! Translation platform data types

use serde::{Deserialize, Serialize};

/// Review stages whose translation is not used; the original text is kept.
pub const ORIGINAL_TEXT_STAGES: [i64; 3] = [0, -1, 2];

/// A file registered on the translation platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: u64,
    /// Path relative to the source root, e.g. `kubejs/assets/quests/lang/en_us.json`.
    pub name: String,
}

/// One translation entry of a remote file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    pub key: String,
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    pub stage: i64,
}

impl TranslationItem {
    /// Text to write: the original for untranslated, hidden or disputed
    /// stages or an empty translation, otherwise the translation.
    #[must_use]
    pub fn resolved_text(&self) -> &str {
        let translation = self.translation.as_deref().unwrap_or_default();
        if ORIGINAL_TEXT_STAGES.contains(&self.stage) || translation.is_empty() {
            self.original.as_deref().unwrap_or_default()
        } else {
            translation
        }
    }
}
