//! Release comparison
//!
//! Two release archives are unpacked into scratch directories, compared file
//! by file, and rendered as a self-contained HTML report with per-file line
//! diffs.

mod directory;
pub mod line_diff;
pub mod report;
mod types;

use std::path::Path;

pub use directory::{compare_directories, is_text_file};
pub use line_diff::{SequenceMatcher, diff_texts};
pub use report::{DEFAULT_TEMPLATE, ReportContext, load_template, render_html};
pub use types::{
    ComparisonResult, DiffLine, DiffLineKind, DiffStats, FileDiff, Hunk, ModifiedContent,
    ModifiedFile, OpTag, Opcode,
};

use crate::archive::extract_archive;
use crate::error::{Error, Result};

/// Extract and compare two release archives.
///
/// Scratch directories are removed when the comparison finishes.
///
/// # Errors
/// Returns an error if either archive is missing, unsupported, or cannot be
/// extracted.
pub fn compare_archives<P: AsRef<Path>, Q: AsRef<Path>>(
    old_archive: P,
    new_archive: Q,
    context: usize,
) -> Result<ComparisonResult> {
    let old_archive = old_archive.as_ref();
    let new_archive = new_archive.as_ref();
    for archive in [old_archive, new_archive] {
        if !archive.is_file() {
            return Err(Error::ArchiveNotFound(archive.to_path_buf()));
        }
    }

    let old_dir = tempfile::tempdir()?;
    let new_dir = tempfile::tempdir()?;
    extract_archive(old_archive, old_dir.path())?;
    extract_archive(new_archive, new_dir.path())?;

    compare_directories(old_dir.path(), new_dir.path(), context)
}

/// Write a rendered report, creating parent directories.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_report<P: AsRef<Path>>(path: P, html: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_io(parent, e))?;
    }
    std::fs::write(path, html).map_err(|e| Error::file_io(path, e))
}
