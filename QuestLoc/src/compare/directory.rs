//! Directory tree comparison

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use super::line_diff::diff_texts;
use super::types::{ComparisonResult, ModifiedContent, ModifiedFile};
use crate::error::{Error, Result};
use crate::utils::normalize_path;

/// Bytes inspected to decide whether a file is text.
const TEXT_SNIFF_LEN: u64 = 1024;

/// Compare two directory trees file by file.
///
/// Files are matched by relative path. Equal size and SHA-256 means
/// unchanged. Changed files that look like text on both sides get a line
/// diff with `context` lines around each change; a text file that cannot be
/// read is reported with the read error instead of aborting.
///
/// # Errors
/// Returns an error if either tree cannot be walked.
pub fn compare_directories<P: AsRef<Path>, Q: AsRef<Path>>(
    old_dir: P,
    new_dir: Q,
    context: usize,
) -> Result<ComparisonResult> {
    let old_dir = old_dir.as_ref();
    let new_dir = new_dir.as_ref();
    let old_files = relative_files(old_dir)?;
    let new_files = relative_files(new_dir)?;

    let mut result = ComparisonResult {
        added: new_files.difference(&old_files).cloned().collect(),
        removed: old_files.difference(&new_files).cloned().collect(),
        ..ComparisonResult::default()
    };

    for path in old_files.intersection(&new_files) {
        let old_path = old_dir.join(path);
        let new_path = new_dir.join(path);

        if same_contents(&old_path, &new_path)? {
            result.identical.push(path.clone());
            continue;
        }

        let content = if is_text_file(&old_path) && is_text_file(&new_path) {
            tracing::debug!("Diffing {path}");
            match (read_text(&old_path), read_text(&new_path)) {
                (Ok(old), Ok(new)) => ModifiedContent::Text(diff_texts(&old, &new, context)),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::warn!("Could not read {path} for diffing: {e}");
                    ModifiedContent::Unreadable(format!("{path}: {e}"))
                }
            }
        } else {
            ModifiedContent::Binary
        };
        result.modified.push(ModifiedFile {
            path: path.clone(),
            content,
        });
    }

    tracing::info!("Compared releases: {}", result.summary());
    Ok(result)
}

/// Relative paths of all regular files under `root`, with forward slashes.
fn relative_files(root: &Path) -> Result<BTreeSet<String>> {
    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
        files.insert(normalize_path(relative));
    }
    Ok(files)
}

/// Size check first, then SHA-256. Unreadable files count as changed.
fn same_contents(a: &Path, b: &Path) -> Result<bool> {
    let size_a = std::fs::metadata(a).map_err(|e| Error::file_io(a, e))?.len();
    let size_b = std::fs::metadata(b).map_err(|e| Error::file_io(b, e))?.len();
    if size_a != size_b {
        return Ok(false);
    }
    match (sha256_file(a), sha256_file(b)) {
        (Ok(hash_a), Ok(hash_b)) => Ok(hash_a == hash_b),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Could not hash files for comparison: {e}");
            Ok(false)
        }
    }
}

fn sha256_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| Error::file_io(path, e))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| Error::file_io(path, e))?;
    Ok(hasher.finalize().to_vec())
}

/// A file is text when its first KiB is valid UTF-8. A multi-byte character
/// cut off by the sniff limit does not count against it.
#[must_use]
pub fn is_text_file(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut head = Vec::new();
    if file.take(TEXT_SNIFF_LEN).read_to_end(&mut head).is_err() {
        return false;
    }
    match std::str::from_utf8(&head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && head.len() as u64 == TEXT_SNIFF_LEN,
    }
}

/// Read errors stay bare so the report names only the relative path.
fn read_text(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
