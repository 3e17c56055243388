//! Translation platform sync
//!
//! Pulls every file of a Paratranz project, overlays the translations on the
//! source-language JSON, writes the result under the output root with the
//! target language in the file name, and merges FTB Quests lang JSON into the
//! quest SNBT file.

mod client;
mod types;
mod writer;

use std::fmt;
use std::path::PathBuf;

pub use client::{Credentials, ParatranzClient, TranslationSource};
pub use types::{ORIGINAL_TEXT_STAGES, RemoteFile, TranslationItem};
pub use writer::{KeyOrder, ProcessedFile, load_source, output_path, process_translation, save_translation};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::lang::merge::{MergeOptions, MergeReport, merge};

/// A remote file written to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedFile {
    pub remote: String,
    pub output: PathBuf,
    pub entries: usize,
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub files: Vec<SyncedFile>,
    /// Remote files skipped by the skip marker.
    pub skipped: Vec<String>,
    /// Present when quest lang files were synced and merged.
    pub merge: Option<MergeReport>,
}

impl SyncReport {
    pub fn summary(&self) -> String {
        let merged = match &self.merge {
            Some(report) => format!(", {} quest entries merged", report.reconstructed_entries),
            None => String::new(),
        };
        format!(
            "{} files synced, {} skipped{merged}",
            self.files.len(),
            self.skipped.len()
        )
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for file in &self.files {
            writeln!(f, "  {} -> {} ({} entries)", file.remote, file.output.display(), file.entries)?;
        }
        Ok(())
    }
}

/// Remote files that would be synced, with skipped ones removed.
///
/// # Errors
/// Returns an error if the file list cannot be fetched.
pub fn list_syncable(config: &SyncConfig, source: &dyn TranslationSource) -> Result<(Vec<RemoteFile>, Vec<String>)> {
    let (skipped, files): (Vec<RemoteFile>, Vec<RemoteFile>) = source
        .list_files()?
        .into_iter()
        .partition(|file| file.name.contains(&config.skip_marker));
    Ok((files, skipped.into_iter().map(|file| file.name).collect()))
}

/// Download every remote file and write it into the output tree.
///
/// Files whose name contains the skip marker are ignored. If any file lives
/// in the quest lang directory, that directory's target-language JSON files
/// are merged into the configured SNBT output afterwards.
///
/// # Errors
/// Any request failure aborts the run immediately, as do unreadable source
/// files, unsafe remote paths and write failures.
pub fn sync(config: &SyncConfig, source: &dyn TranslationSource) -> Result<SyncReport> {
    let (files, skipped) = list_syncable(config, source)?;
    tracing::info!("{} remote files to sync, {} skipped", files.len(), skipped.len());

    let mut report = SyncReport {
        skipped,
        ..SyncReport::default()
    };
    let mut quest_lang_dir: Option<PathBuf> = None;

    for file in &files {
        let output = output_path(&file.name, config)?;
        let items = source.file_translations(file.id)?;
        let source_contents = load_source(&config.source_root.join(&file.name))?;
        if source_contents.is_none() {
            tracing::warn!(
                "{} has no source file under {}, keys will be sorted alphabetically",
                file.name,
                config.source_root.display()
            );
        }

        let processed = process_translation(&items, &file.name, source_contents, config);
        let entries = save_translation(&processed, &output)?;
        tracing::info!("Synced {} -> {}", file.name, output.display());

        if file.name.contains(&config.quest_lang_dir_marker) {
            quest_lang_dir = output.parent().map(PathBuf::from);
        }
        report.files.push(SyncedFile {
            remote: file.name.clone(),
            output,
            entries,
        });
    }

    if let Some(json_dir) = quest_lang_dir {
        tracing::info!("Quest lang files synced, merging {} into SNBT", json_dir.display());
        report.merge = Some(merge(&MergeOptions {
            json_dir,
            output_snbt: config.merged_output.clone(),
            prefix: Some(config.target_lang.clone()),
        })?);
    }

    tracing::info!("Sync complete: {}", report.summary());
    Ok(report)
}
