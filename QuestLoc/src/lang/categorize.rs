//! Categorizer
//!
//! Routes each flat entry to exactly one output group by evaluating an
//! ordered rule list; the first matching rule wins and unmatched keys fall
//! through to [`CategoryGroup::Other`].

use indexmap::IndexMap;

use crate::config::CategoryConfig;
use crate::formats::lang::FlatMap;

/// Where an entry is routed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    /// `chapter.*`, distributed to chapter files.
    Chapter,
    /// `quest.*`, distributed to chapter files.
    Quest,
    /// `task.*`, distributed to chapter files.
    Task,
    /// `reward.*`, distributed to chapter files.
    Reward,
    /// A fixed category file from the table.
    File(String),
    /// Anything not matched by another rule.
    Other,
}

/// Test applied to a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPredicate {
    Prefix(String),
}

impl KeyPredicate {
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Prefix(prefix) => key.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub predicate: KeyPredicate,
    pub group: CategoryGroup,
}

impl CategoryRule {
    fn prefix(prefix: &str, group: CategoryGroup) -> Self {
        Self {
            predicate: KeyPredicate::Prefix(prefix.to_string()),
            group,
        }
    }
}

/// Entries split by group, each keeping source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categorized {
    pub chapters: FlatMap,
    pub quests: FlatMap,
    pub tasks: FlatMap,
    pub rewards: FlatMap,
    /// Category files in table order; a file with no entries is still listed.
    pub files: IndexMap<String, FlatMap>,
    pub other: FlatMap,
}

/// Ordered rule interpreter.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    /// Build the rule list: the four hierarchy prefixes first, then every
    /// prefix of the category table in table order.
    #[must_use]
    pub fn new(table: &[CategoryConfig]) -> Self {
        let mut rules = vec![
            CategoryRule::prefix("chapter.", CategoryGroup::Chapter),
            CategoryRule::prefix("quest.", CategoryGroup::Quest),
            CategoryRule::prefix("task.", CategoryGroup::Task),
            CategoryRule::prefix("reward.", CategoryGroup::Reward),
        ];
        for category in table {
            for prefix in &category.prefixes {
                rules.push(CategoryRule::prefix(
                    prefix,
                    CategoryGroup::File(category.file.clone()),
                ));
            }
        }
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Group for a single key.
    #[must_use]
    pub fn classify(&self, key: &str) -> &CategoryGroup {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(key))
            .map_or(&CategoryGroup::Other, |rule| &rule.group)
    }

    /// Partition a flat map.
    #[must_use]
    pub fn categorize(&self, flat: &FlatMap) -> Categorized {
        let mut result = Categorized::default();
        for rule in &self.rules {
            if let CategoryGroup::File(file) = &rule.group {
                result.files.entry(file.clone()).or_default();
            }
        }

        for (key, value) in flat {
            let target = match self.classify(key) {
                CategoryGroup::Chapter => &mut result.chapters,
                CategoryGroup::Quest => &mut result.quests,
                CategoryGroup::Task => &mut result.tasks,
                CategoryGroup::Reward => &mut result.rewards,
                CategoryGroup::File(file) => result.files.entry(file.clone()).or_default(),
                CategoryGroup::Other => &mut result.other,
            };
            target.insert(key.clone(), value.clone());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SplitConfig;

    fn flat(pairs: &[(&str, &str)]) -> FlatMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_table() {
        let categorizer = Categorizer::new(&SplitConfig::default().resolved_categories());
        let result = categorizer.categorize(&flat(&[
            ("quest.AB.title", "Hello"),
            ("quest.AB.desc1", "Line1"),
            ("chapter_group.01.title", "Group"),
            ("chapter.01.title", "Chapter"),
            ("reward_table.02.title", "Loot"),
            ("task.CD.title", "Task"),
            ("reward.EF.title", "Reward"),
            ("other.key", "X"),
        ]));

        assert_eq!(result.quests.len(), 2);
        assert_eq!(result.chapters.len(), 1);
        assert_eq!(result.tasks.len(), 1);
        assert_eq!(result.rewards.len(), 1);
        assert_eq!(result.files["en_us_chapters.json"].len(), 1);
        assert_eq!(result.files["en_us_reward_tables.json"].len(), 1);
        assert_eq!(result.other, flat(&[("other.key", "X")]));
    }

    #[test]
    fn test_first_match_wins() {
        let table = vec![
            CategoryConfig {
                file: "a.json".to_string(),
                prefixes: vec!["item.".to_string()],
            },
            CategoryConfig {
                file: "b.json".to_string(),
                prefixes: vec!["item.special.".to_string()],
            },
        ];
        let categorizer = Categorizer::new(&table);

        assert_eq!(
            categorizer.classify("item.special.name"),
            &CategoryGroup::File("a.json".to_string())
        );
        assert_eq!(categorizer.classify("block.stone"), &CategoryGroup::Other);
        // the built-in hierarchy rules are evaluated before the table
        assert_eq!(categorizer.classify("chapter.01.title"), &CategoryGroup::Chapter);
    }

    #[test]
    fn test_each_entry_lands_once() {
        let categorizer = Categorizer::new(&SplitConfig::default().resolved_categories());
        let input = flat(&[("chapter.1", "a"), ("chapter_group.1", "b"), ("x", "c")]);
        let result = categorizer.categorize(&input);

        let total = result.chapters.len()
            + result.quests.len()
            + result.tasks.len()
            + result.rewards.len()
            + result.files.values().map(FlatMap::len).sum::<usize>()
            + result.other.len();
        assert_eq!(total, input.len());
    }
}
