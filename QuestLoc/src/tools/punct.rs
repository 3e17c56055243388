//! Full-width punctuation normalisation
//!
//! Chinese text should use full-width punctuation, but translators often type
//! ASCII marks. In JSON files, an ASCII mark is replaced when neither
//! neighbour is a quote, a colon or a CJK ideograph, so JSON syntax
//! (`"key": "value",`) and marks already next to Chinese text are left alone.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// ASCII mark and its full-width replacement.
const PUNCTUATION: [(char, char); 16] = [
    (',', '，'),
    ('.', '。'),
    (';', '；'),
    ('?', '？'),
    ('!', '！'),
    ('(', '（'),
    (')', '）'),
    ('[', '【'),
    (']', '】'),
    ('{', '｛'),
    ('}', '｝'),
    ('<', '《'),
    ('>', '》'),
    ('/', '／'),
    ('\\', '＼'),
    ('|', '｜'),
];

fn full_width(c: char) -> Option<char> {
    PUNCTUATION
        .iter()
        .find(|(ascii, _)| *ascii == c)
        .map(|(_, wide)| *wide)
}

/// Neighbours that block a replacement.
fn is_guard(c: char) -> bool {
    matches!(c, '"' | '\'' | ':' | '\u{4e00}'..='\u{9fa5}')
}

/// Replace eligible ASCII punctuation in `content`.
///
/// Marks at the very start or end of the text have a missing neighbour and
/// are never replaced.
#[must_use]
pub fn normalize_punctuation(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let Some(wide) = full_width(c) else {
                return c;
            };
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let next = chars.get(i + 1);
            match (prev, next) {
                (Some(&prev), Some(&next)) if !is_guard(prev) && !is_guard(next) => wide,
                _ => c,
            }
        })
        .collect()
}

/// Outcome of a normalisation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunctReport {
    pub files_checked: usize,
    pub files_changed: Vec<PathBuf>,
}

/// Normalise every `.json` file under `root`, rewriting files that change.
///
/// # Errors
/// Returns an error if the tree cannot be walked or a file read or written.
pub fn normalize_tree<P: AsRef<Path>>(root: P) -> Result<PunctReport> {
    let root = root.as_ref();
    let mut report = PunctReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        report.files_checked += 1;
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_io(path, e))?;
        let normalized = normalize_punctuation(&content);
        if normalized != content {
            std::fs::write(path, normalized).map_err(|e| Error::file_io(path, e))?;
            tracing::info!("Normalised punctuation in {}", path.display());
            report.files_changed.push(path.to_path_buf());
        }
    }

    Ok(report)
}
