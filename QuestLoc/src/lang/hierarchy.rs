//! Hierarchy linker
//!
//! Chapter documents describe which quests a chapter owns and which tasks and
//! rewards each quest owns:
//!
//! ```text
//! {
//! 	id: "0F8A2C1B3D4E5F60"
//! 	quests: [
//! 		{
//! 			id: "1A2B3C4D5E6F7081"
//! 			tasks: [{ id: "..." }]
//! 			rewards: [{ id: "..." }]
//! 		}
//! 	]
//! }
//! ```
//!
//! The linker reads these once, records task and reward ownership, and then
//! gathers each chapter's language entries from the categorized maps.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::categorize::Categorized;
use crate::error::{Error, Result};
use crate::formats::lang::FlatMap;
use crate::formats::snbt::{SnbtValue, read_snbt};

/// A quest and the ids of the tasks and rewards it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestNode {
    pub id: String,
    pub task_ids: Vec<String>,
    pub reward_ids: Vec<String>,
}

/// One chapter document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterNode {
    pub id: String,
    /// File name without `.snbt`, used to name the chapter's JSON file.
    pub file_stem: String,
    pub quests: Vec<QuestNode>,
}

impl ChapterNode {
    /// Build a chapter from its parsed document.
    ///
    /// Quests, tasks and rewards without an id are ignored.
    ///
    /// # Errors
    /// Returns [`Error::ChapterMissingId`] if the document has no `id`.
    pub fn from_snbt(path: &Path, document: &SnbtValue) -> Result<Self> {
        let id = document
            .get_str("id")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::ChapterMissingId {
                path: path.to_path_buf(),
            })?;

        let quests = document
            .get_list("quests")
            .iter()
            .filter_map(|quest| {
                let quest_id = quest.get_str("id").filter(|id| !id.is_empty())?;
                Some(QuestNode {
                    id: quest_id.to_string(),
                    task_ids: child_ids(quest, "tasks"),
                    reward_ids: child_ids(quest, "rewards"),
                })
            })
            .collect();

        let file_stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            file_stem,
            quests,
        })
    }

    /// Collect this chapter's entries from the categorized maps.
    ///
    /// Output order: chapter entries, then per quest its own entries followed
    /// by those of its tasks and rewards. Callers sort afterwards.
    #[must_use]
    pub fn assemble(&self, categorized: &Categorized) -> FlatMap {
        let mut output = FlatMap::new();

        let chapter_key = format!("chapter.{}", self.id);
        let chapter_prefix = format!("{chapter_key}.");
        for (key, value) in &categorized.chapters {
            if *key == chapter_key || key.starts_with(&chapter_prefix) {
                output.insert(key.clone(), value.clone());
            }
        }

        for quest in &self.quests {
            copy_prefixed(&categorized.quests, &format!("quest.{}.", quest.id), &mut output);
            for task_id in &quest.task_ids {
                copy_prefixed(&categorized.tasks, &format!("task.{task_id}."), &mut output);
            }
            for reward_id in &quest.reward_ids {
                copy_prefixed(&categorized.rewards, &format!("reward.{reward_id}."), &mut output);
            }
        }

        output
    }
}

fn child_ids(quest: &SnbtValue, field: &str) -> Vec<String> {
    quest
        .get_list(field)
        .iter()
        .filter_map(|child| child.get_str("id"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn copy_prefixed(source: &FlatMap, prefix: &str, output: &mut FlatMap) {
    for (key, value) in source {
        if key.starts_with(prefix) {
            output.insert(key.clone(), value.clone());
        }
    }
}

/// All chapters plus task/reward ownership maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub chapters: Vec<ChapterNode>,
    pub task_to_quest: HashMap<String, String>,
    pub reward_to_quest: HashMap<String, String>,
}

impl Hierarchy {
    /// Load every `.snbt` file directly inside `dir`, in file-name order.
    ///
    /// Files that fail to parse or have no `id` are skipped with a warning.
    /// A missing directory yields an empty hierarchy.
    ///
    /// # Errors
    /// Returns an error if the directory exists but cannot be listed.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            tracing::warn!("Chapters directory {} not found, no chapter files will be written", dir.display());
            return Ok(Self::default());
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| Error::file_io(dir, e))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("snbt"))
            })
            .collect();
        paths.sort();

        let mut chapters = Vec::with_capacity(paths.len());
        for path in &paths {
            let chapter = read_snbt(path).and_then(|doc| ChapterNode::from_snbt(path, &doc));
            match chapter {
                Ok(chapter) => chapters.push(chapter),
                Err(e) => tracing::warn!("Skipping chapter file {}: {e}", path.display()),
            }
        }

        tracing::info!("Loaded {} chapter files from {}", chapters.len(), dir.display());
        Ok(Self::from_chapters(chapters))
    }

    /// Build the ownership maps from already loaded chapters.
    #[must_use]
    pub fn from_chapters(chapters: Vec<ChapterNode>) -> Self {
        let mut task_to_quest = HashMap::new();
        let mut reward_to_quest = HashMap::new();

        for quest in chapters.iter().flat_map(|chapter| &chapter.quests) {
            for task_id in &quest.task_ids {
                task_to_quest.insert(task_id.clone(), quest.id.clone());
            }
            for reward_id in &quest.reward_ids {
                reward_to_quest.insert(reward_id.clone(), quest.id.clone());
            }
        }

        Self {
            chapters,
            task_to_quest,
            reward_to_quest,
        }
    }

    /// Owning quest of a task.
    #[must_use]
    pub fn quest_of_task(&self, task_id: &str) -> Option<&str> {
        self.task_to_quest.get(task_id).map(String::as_str)
    }

    /// Owning quest of a reward.
    #[must_use]
    pub fn quest_of_reward(&self, reward_id: &str) -> Option<&str> {
        self.reward_to_quest.get(reward_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SplitConfig;
    use crate::formats::snbt::parse_snbt;
    use crate::lang::categorize::Categorizer;

    const CHAPTER: &str = r#"{
	id: "C1"
	quests: [
		{
			id: "Q1"
			tasks: [{ id: "T1" }]
			rewards: [{ id: "R1" }]
		}
		{
			id: "Q2"
		}
		{
			title: "no id"
		}
	]
}"#;

    fn chapter() -> ChapterNode {
        let doc = parse_snbt(CHAPTER).unwrap();
        ChapterNode::from_snbt(Path::new("chapters/getting_started.snbt"), &doc).unwrap()
    }

    #[test]
    fn test_from_snbt() {
        let chapter = chapter();
        assert_eq!(chapter.id, "C1");
        assert_eq!(chapter.file_stem, "getting_started");
        assert_eq!(chapter.quests.len(), 2);
        assert_eq!(chapter.quests[0].task_ids, vec!["T1"]);
        assert!(chapter.quests[1].reward_ids.is_empty());
    }

    #[test]
    fn test_missing_id() {
        let doc = parse_snbt("{quests: []}").unwrap();
        assert!(matches!(
            ChapterNode::from_snbt(Path::new("x.snbt"), &doc),
            Err(Error::ChapterMissingId { .. })
        ));
    }

    #[test]
    fn test_ownership_maps() {
        let hierarchy = Hierarchy::from_chapters(vec![chapter()]);
        assert_eq!(hierarchy.quest_of_task("T1"), Some("Q1"));
        assert_eq!(hierarchy.quest_of_reward("R1"), Some("Q1"));
        assert_eq!(hierarchy.quest_of_task("T9"), None);
    }

    #[test]
    fn test_assemble_collects_descendants() {
        let flat: FlatMap = [
            ("chapter.C1.title", "Start"),
            ("chapter.C10.title", "Other chapter"),
            ("quest.Q1.title", "Quest"),
            ("task.T1.title", "Task"),
            ("reward.R1.title", "Reward"),
            ("quest.Q3.title", "Elsewhere"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
        let categorized = Categorizer::new(&SplitConfig::default().resolved_categories()).categorize(&flat);

        let assembled = chapter().assemble(&categorized);
        let keys: Vec<_> = assembled.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["chapter.C1.title", "quest.Q1.title", "task.T1.title", "reward.R1.title"]
        );
    }

    #[test]
    fn test_load_dir_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_good.snbt"), CHAPTER).unwrap();
        std::fs::write(dir.path().join("a_broken.snbt"), "{ id: ").unwrap();
        std::fs::write(dir.path().join("c_noid.snbt"), "{ quests: [] }").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let hierarchy = Hierarchy::load_dir(dir.path()).unwrap();
        assert_eq!(hierarchy.chapters.len(), 1);
        assert_eq!(hierarchy.chapters[0].file_stem, "b_good");
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let hierarchy = Hierarchy::load_dir(dir.path().join("missing")).unwrap();
        assert!(hierarchy.chapters.is_empty());
    }
}
