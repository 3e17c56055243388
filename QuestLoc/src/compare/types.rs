//! Core types for release comparison

use std::fmt;

/// Kind of edit between two line ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// Transform `old[a_start..a_end]` into `new[b_start..b_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl Opcode {
    #[must_use]
    pub fn new(tag: OpTag, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }
}

/// Added/removed line counts of a text diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
}

/// Type of a rendered diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    Context,
    Added,
    Removed,
}

impl fmt::Display for DiffLineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context => write!(f, " "),
            Self::Added => write!(f, "+"),
            Self::Removed => write!(f, "-"),
        }
    }
}

/// One line of a hunk with 1-based line numbers on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    /// Line text without its line ending.
    pub text: String,
}

/// A group of changes with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Unified header, e.g. `@@ -3,5 +3,6 @@`.
    pub header: String,
    pub lines: Vec<DiffLine>,
}

/// Line diff of one modified text file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiff {
    pub stats: DiffStats,
    pub hunks: Vec<Hunk>,
}

/// What the report shows for a modified file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifiedContent {
    Text(FileDiff),
    Binary,
    /// The file looked like text but could not be read for diffing.
    Unreadable(String),
}

/// A file present in both releases with different contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifiedFile {
    /// Relative path with forward slashes.
    pub path: String,
    pub content: ModifiedContent,
}

/// Outcome of comparing two release trees. All lists are sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<ModifiedFile>,
    pub identical: Vec<String>,
}

impl ComparisonResult {
    /// Check if the two trees have the same files with the same contents
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of changed files
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} added, {} removed, {} modified, {} unchanged",
            self.added.len(),
            self.removed.len(),
            self.modified.len(),
            self.identical.len()
        )
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for path in &self.added {
            writeln!(f, "+ {path}")?;
        }
        for path in &self.removed {
            writeln!(f, "- {path}")?;
        }
        for file in &self.modified {
            match &file.content {
                ModifiedContent::Text(diff) => writeln!(
                    f,
                    "~ {} (+{} -{})",
                    file.path, diff.stats.added, diff.stats.removed
                )?,
                ModifiedContent::Binary => writeln!(f, "~ {} (binary)", file.path)?,
                ModifiedContent::Unreadable(reason) => writeln!(f, "~ {} ({reason})", file.path)?,
            }
        }
        Ok(())
    }
}
