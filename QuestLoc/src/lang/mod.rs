//! Language file transformation
//!
//! The split direction turns one SNBT language file into translator-friendly
//! JSON files:
//!
//! 1. [`flatten`]: list values become numbered keys (`desc1`, `desc2`, ...)
//! 2. [`categorize`]: entries are routed to output groups by key prefix
//! 3. [`hierarchy`]: chapter documents decide which chapter owns each
//!    quest, task and reward entry
//! 4. [`sort`]: each chapter's entries are put in reading order
//!
//! The merge direction ([`reconstruct`]) regroups numbered keys into lists
//! and produces SNBT again.

pub mod categorize;
pub mod escape;
pub mod flatten;
pub mod hierarchy;
pub mod merge;
pub mod reconstruct;
pub mod sort;
pub mod split;

use std::sync::LazyLock;

use regex::Regex;

pub use categorize::{CategoryGroup, CategoryRule, Categorized, Categorizer, KeyPredicate};
pub use escape::{escape, unescape};
pub use flatten::{FlattenMode, flatten};
pub use hierarchy::{ChapterNode, Hierarchy, QuestNode};
pub use merge::{LoadedJson, MergeOptions, MergeReport, load_json_dir, merge};
pub use reconstruct::{escape_lang_map, reconstruct};
pub use sort::{HierarchicalSorter, SortKey};
pub use split::{SplitOptions, SplitReport, WrittenFile, split};

/// `(text)(digits)` at the end of a key.
pub(crate) static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)([0-9]+)$").expect("valid trailing digits pattern"));
