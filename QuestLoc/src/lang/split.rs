//! Split pipeline: one SNBT language file into categorized JSON files

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use super::categorize::Categorizer;
use super::flatten::{FlattenMode, flatten};
use super::hierarchy::Hierarchy;
use super::sort::HierarchicalSorter;
use crate::config::{CategoryConfig, Config, SortConfig};
use crate::error::{Error, Result};
use crate::formats::lang::{FlatMap, lang_map_from_snbt, write_lang_json};
use crate::formats::snbt::read_snbt;

/// Inputs of a split run.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub source_lang: PathBuf,
    pub chapters_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Prefix of chapter file names, e.g. `en_us`.
    pub lang: String,
    pub mode: FlattenMode,
    pub categories: Vec<CategoryConfig>,
    pub other_file: String,
    pub sort: SortConfig,
}

impl SplitOptions {
    /// Options taken from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let split = &config.split;
        Self {
            source_lang: split.source_lang.clone(),
            chapters_dir: split.chapters_dir.clone(),
            output_dir: split.output_dir.clone(),
            lang: split.lang.clone(),
            mode: FlattenMode::from_flag(split.flatten_single_lines),
            categories: split.resolved_categories(),
            other_file: split.resolved_other_file(),
            sort: config.sort.clone(),
        }
    }

    fn unlinked_file(&self) -> String {
        format!("{}_unlinked_entries.json", self.lang)
    }
}

/// A JSON file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub entries: usize,
}

/// Outcome of a split run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Top-level entries in the source SNBT.
    pub source_entries: usize,
    /// Entries after flattening.
    pub flat_entries: usize,
    /// Every file written, in write order.
    pub files: Vec<WrittenFile>,
    /// How many of `files` are chapter files.
    pub chapter_files: usize,
    /// Hierarchy entries owned by no chapter.
    pub unlinked_entries: usize,
}

impl SplitReport {
    pub fn summary(&self) -> String {
        format!(
            "{} source entries, {} flat entries, {} files ({} chapters)",
            self.source_entries,
            self.flat_entries,
            self.files.len(),
            self.chapter_files
        )
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for file in &self.files {
            writeln!(f, "  {} ({} entries)", file.path.display(), file.entries)?;
        }
        Ok(())
    }
}

/// Split the source language file into JSON files.
///
/// Writes, in order: non-empty category files, the other-entries file, one
/// sorted file per chapter with entries, and an unlinked-entries file when
/// some chapter/quest/task/reward keys belong to no chapter.
///
/// A chapter whose file name matches one already written in the run (such
/// as a chapter document called `other_entries.snbt`) gets a numeric suffix.
///
/// # Errors
/// Returns an error if the source file cannot be read or parsed, or a file
/// cannot be written. Broken chapter documents are skipped, not fatal.
pub fn split(options: &SplitOptions) -> Result<SplitReport> {
    tracing::info!("Splitting {}", options.source_lang.display());
    let document = read_snbt(&options.source_lang)?;
    let lang_map = lang_map_from_snbt(&document)?;
    let flat = flatten(&lang_map, options.mode);
    tracing::info!(
        "Loaded {} source entries, {} after flattening",
        lang_map.len(),
        flat.len()
    );

    std::fs::create_dir_all(&options.output_dir)
        .map_err(|e| Error::file_io(&options.output_dir, e))?;

    let mut report = SplitReport {
        source_entries: lang_map.len(),
        flat_entries: flat.len(),
        ..SplitReport::default()
    };

    let categorized = Categorizer::new(&options.categories).categorize(&flat);
    for (file, entries) in &categorized.files {
        write_entries(&options.output_dir, file, entries, &mut report)?;
    }
    write_entries(&options.output_dir, &options.other_file, &categorized.other, &mut report)?;

    let hierarchy = Hierarchy::load_dir(&options.chapters_dir)?;
    let sorter = HierarchicalSorter::new(&options.sort, &hierarchy);
    let mut linked: HashSet<String> = HashSet::new();

    for chapter in &hierarchy.chapters {
        let entries = chapter.assemble(&categorized);
        if entries.is_empty() {
            tracing::debug!("Chapter {} has no language entries", chapter.file_stem);
            continue;
        }
        linked.extend(entries.keys().cloned());
        let file = format!("{}_{}.json", options.lang, chapter.file_stem);
        if write_entries(&options.output_dir, &file, &sorter.sort(&entries), &mut report)? {
            report.chapter_files += 1;
        }
    }

    let unlinked: FlatMap = [
        &categorized.chapters,
        &categorized.quests,
        &categorized.tasks,
        &categorized.rewards,
    ]
    .into_iter()
    .flatten()
    .filter(|(key, _)| !linked.contains(*key))
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect();

    if !unlinked.is_empty() {
        tracing::warn!(
            "{} entries belong to no chapter, writing them to {}",
            unlinked.len(),
            options.unlinked_file()
        );
        report.unlinked_entries = unlinked.len();
        write_entries(
            &options.output_dir,
            &options.unlinked_file(),
            &sorter.sort(&unlinked),
            &mut report,
        )?;
    }

    tracing::info!("Split complete: {}", report.summary());
    Ok(report)
}

/// Write `entries` to `dir/file` unless empty. Returns whether a file was written.
fn write_entries(dir: &Path, file: &str, entries: &FlatMap, report: &mut SplitReport) -> Result<bool> {
    if entries.is_empty() {
        return Ok(false);
    }
    let path = dir.join(unique_file_name(file, &report.files));
    write_lang_json(&path, entries)?;
    tracing::info!("Wrote {} entries to {}", entries.len(), path.display());
    report.files.push(WrittenFile {
        path,
        entries: entries.len(),
    });
    Ok(true)
}

/// `file`, or `file` with a `_2`, `_3`, ... suffix when a file written
/// earlier in this run already took the name. Compared case-insensitively.
fn unique_file_name(file: &str, written: &[WrittenFile]) -> String {
    let taken = |name: &str| {
        written.iter().any(|w| {
            w.path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().eq_ignore_ascii_case(name))
        })
    };
    if !taken(file) {
        return file.to_string();
    }

    let (stem, extension) = file.rsplit_once('.').map_or((file, None), |(s, e)| (s, Some(e)));
    let mut n = 2;
    loop {
        let candidate = match extension {
            Some(extension) => format!("{stem}_{n}.{extension}"),
            None => format!("{stem}_{n}"),
        };
        if !taken(&candidate) {
            tracing::warn!("{file} was already written in this run, writing {candidate} instead");
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = SplitOptions::from_config(&Config::default());
        options.source_lang = dir.path().join("missing.snbt");
        options.output_dir = dir.path().join("out");

        assert!(matches!(split(&options), Err(Error::FileIo { .. })));
    }

    #[test]
    fn test_unique_file_name() {
        let written = |names: &[&str]| -> Vec<WrittenFile> {
            names
                .iter()
                .map(|name| WrittenFile {
                    path: PathBuf::from("out").join(name),
                    entries: 1,
                })
                .collect()
        };

        assert_eq!(unique_file_name("en_us_a.json", &written(&[])), "en_us_a.json");
        assert_eq!(
            unique_file_name("en_us_a.json", &written(&["EN_US_A.json"])),
            "en_us_a_2.json"
        );
        assert_eq!(
            unique_file_name("en_us_a.json", &written(&["en_us_a.json", "en_us_a_2.json"])),
            "en_us_a_3.json"
        );
    }

    #[test]
    fn test_summary() {
        let report = SplitReport {
            source_entries: 3,
            flat_entries: 4,
            files: vec![WrittenFile {
                path: PathBuf::from("out/en_us_a.json"),
                entries: 4,
            }],
            chapter_files: 1,
            unlinked_entries: 0,
        };
        assert_eq!(report.summary(), "3 source entries, 4 flat entries, 1 files (1 chapters)");
    }
}
