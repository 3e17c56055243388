//! Hierarchical sorter
//!
//! Orders a chapter's entries so that chapter-level text comes first, then
//! each quest followed by its tasks and rewards, with fields in a configured
//! order and numbered lines in numeric order.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use super::TRAILING_DIGITS;
use super::hierarchy::Hierarchy;
use crate::config::SortConfig;
use crate::formats::lang::FlatMap;

static HIERARCHY_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(chapter|quest|task|reward)\.([^.]+)(?:\.(.*))?$").expect("valid hierarchy key pattern")
});

/// Rank given to anything the derivation rules do not cover.
const UNRANKED: u8 = 99;
const UNLISTED_FIELD: usize = 99;

/// Composite sort key of one entry, compared field by field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    /// 0 for chapter entries, 1 for everything else.
    pub level_rank: u8,
    /// Chapter or quest id; tasks and rewards use their owning quest.
    pub group_id: String,
    /// 0 for chapter/quest, 1 for task, 2 for reward.
    pub type_rank: u8,
    /// Position of the field in the configured order.
    pub custom_rank: usize,
    /// Field name without trailing digits.
    pub text_part: String,
    /// Trailing digits of the field name, 0 if none.
    pub numeric_part: u128,
}

/// Sorts flat entries using the configured field order and quest ownership.
#[derive(Debug, Clone, Copy)]
pub struct HierarchicalSorter<'a> {
    order: &'a SortConfig,
    hierarchy: &'a Hierarchy,
}

impl<'a> HierarchicalSorter<'a> {
    #[must_use]
    pub fn new(order: &'a SortConfig, hierarchy: &'a Hierarchy) -> Self {
        Self { order, hierarchy }
    }

    /// Derive the sort key of one entry key.
    #[must_use]
    pub fn sort_key(&self, key: &str) -> SortKey {
        let Some(captures) = HIERARCHY_KEY.captures(key) else {
            // Unrecognised keys group by everything before their last segment.
            let (group, field) = key.rsplit_once('.').unwrap_or(("", key));
            let (text_part, numeric_part) = split_natural(field);
            return SortKey {
                level_rank: 1,
                group_id: group.to_string(),
                type_rank: UNRANKED,
                custom_rank: UNLISTED_FIELD,
                text_part,
                numeric_part,
            };
        };

        let kind = captures.get(1).map_or("", |m| m.as_str());
        let id = captures.get(2).map_or("", |m| m.as_str());
        let field = captures.get(3).map_or("", |m| m.as_str());

        let (level_rank, group_id, type_rank) = match kind {
            "chapter" => (0, id, 0),
            "quest" => (1, id, 0),
            "task" => (1, self.hierarchy.quest_of_task(id).unwrap_or(id), 1),
            _ => (1, self.hierarchy.quest_of_reward(id).unwrap_or(id), 2),
        };

        let custom_rank = self.custom_rank(&format!("{kind}."), field);
        let (text_part, numeric_part) = split_natural(field);

        SortKey {
            level_rank,
            group_id: group_id.to_string(),
            type_rank,
            custom_rank,
            text_part,
            numeric_part,
        }
    }

    fn custom_rank(&self, namespace: &str, field: &str) -> usize {
        let Some(suffixes) = self.order.suffixes_for(namespace) else {
            return UNLISTED_FIELD;
        };
        let dotted = format!(".{field}");
        suffixes
            .iter()
            .position(|suffix| dotted.starts_with(suffix.as_str()))
            .unwrap_or(suffixes.len())
    }

    /// Compare two entry keys.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Return the entries in sorted order. Equal keys keep their input order.
    #[must_use]
    pub fn sort(&self, entries: &FlatMap) -> FlatMap {
        let mut keyed: Vec<(SortKey, &String, &String)> = entries
            .iter()
            .map(|(key, value)| (self.sort_key(key), key, value))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed
            .into_iter()
            .map(|(_, key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Split `desc10` into `("desc", 10)`. Overlong digit runs saturate.
fn split_natural(field: &str) -> (String, u128) {
    match TRAILING_DIGITS.captures(field) {
        Some(captures) => {
            let text = captures.get(1).map_or("", |m| m.as_str());
            let digits = captures.get(2).map_or("", |m| m.as_str());
            (text.to_string(), digits.parse().unwrap_or(u128::MAX))
        }
        None => (field.to_string(), 0),
    }
}
