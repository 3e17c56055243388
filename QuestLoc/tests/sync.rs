use std::collections::HashMap;
use std::path::Path;

use pretty_assertions::assert_eq;
use questloc::config::SyncConfig;
use questloc::formats::lang::lang_map_from_snbt;
use questloc::formats::read_lang_json;
use questloc::prelude::*;
use questloc::sync::{RemoteFile, TranslationItem, list_syncable};
use tempfile::tempdir;

/// Project contents served from memory.
#[derive(Default)]
struct MemorySource {
    files: Vec<RemoteFile>,
    translations: HashMap<u64, Vec<TranslationItem>>,
}

impl MemorySource {
    fn add(&mut self, id: u64, name: &str, items: Vec<TranslationItem>) {
        self.files.push(RemoteFile {
            id,
            name: name.to_string(),
        });
        self.translations.insert(id, items);
    }
}

impl TranslationSource for MemorySource {
    fn list_files(&self) -> Result<Vec<RemoteFile>> {
        Ok(self.files.clone())
    }

    fn file_translations(&self, file_id: u64) -> Result<Vec<TranslationItem>> {
        Ok(self.translations.get(&file_id).cloned().unwrap_or_default())
    }
}

struct OfflineSource;

impl TranslationSource for OfflineSource {
    fn list_files(&self) -> Result<Vec<RemoteFile>> {
        Err(Error::InvalidPath("offline".to_string()))
    }

    fn file_translations(&self, _file_id: u64) -> Result<Vec<TranslationItem>> {
        unreachable!("no files listed")
    }
}

fn item(key: &str, original: &str, translation: &str, stage: i64) -> TranslationItem {
    TranslationItem {
        key: key.to_string(),
        original: Some(original.to_string()),
        translation: Some(translation.to_string()),
        stage,
    }
}

fn config(root: &Path) -> SyncConfig {
    SyncConfig {
        source_root: root.join("Source"),
        output_root: root.join("CNPack"),
        merged_output: root.join("CNPack/config/ftbquests/quests/lang/zh_cn.snbt"),
        ..SyncConfig::default()
    }
}

fn project() -> MemorySource {
    let mut source = MemorySource::default();
    source.add(
        1,
        "kubejs/assets/quests/lang/en_us.json",
        vec![
            item("quest.AB.title", "Hello world", "你好 世界", 1),
            item("quest.AB.quest_desc1", "Line1", "第一行", 3),
            item("quest.AB.quest_desc2", "Line2", "", 1),
            item("quest.AB.image", "{image:a.png width:10}", "{image:a.png width:10}", 1),
        ],
    );
    source.add(2, "TM/kubejs/assets/tm/lang/en_us.json", Vec::new());
    source.add(
        3,
        "resourcepacks/CNPack/assets/mod/lang/en_us.json",
        vec![
            item("b.key", "Say \"hi\"", "Say \\\"hi\\\"", 1),
            item("a.key", "two words", "两个 词", 0),
        ],
    );
    source
}

#[test]
fn test_list_syncable_skips_marker() {
    let dir = tempdir().unwrap();
    let (files, skipped) = list_syncable(&config(dir.path()), &project()).unwrap();

    let ids: Vec<_> = files.iter().map(|file| file.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(skipped, vec!["TM/kubejs/assets/tm/lang/en_us.json".to_string()]);
}

#[test]
fn test_sync_writes_and_merges() {
    let dir = tempdir().unwrap();
    let config = config(dir.path());

    let source_file = dir.path().join("Source/kubejs/assets/quests/lang/en_us.json");
    std::fs::create_dir_all(source_file.parent().unwrap()).unwrap();
    std::fs::write(
        &source_file,
        r#"{
    "quest.AB.quest_desc1": "Line1",
    "quest.AB.title": "Hello world",
    "quest.AB.quest_desc2": "Line2",
    "quest.AB.image": "{image:a.png width:10}",
    "extra.key": "Extra"
}"#,
    )
    .unwrap();

    let report = sync(&config, &project()).unwrap();
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    // Quest file: source order, non-breaking spaces, stage fallback
    let quest_json = dir.path().join("CNPack/kubejs/assets/quests/lang/zh_cn.json");
    let quest = read_lang_json(&quest_json).unwrap();
    let keys: Vec<_> = quest.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "quest.AB.quest_desc1",
            "quest.AB.title",
            "quest.AB.quest_desc2",
            "quest.AB.image",
            "extra.key",
        ]
    );
    assert_eq!(quest["quest.AB.title"], LangValue::from("你好\u{a0}世界"));
    assert_eq!(quest["quest.AB.quest_desc1"], LangValue::from("第一行"));
    assert_eq!(quest["quest.AB.quest_desc2"], LangValue::from("Line2"));
    assert_eq!(quest["quest.AB.image"], LangValue::from("{image:a.png width:10}"));
    assert_eq!(quest["extra.key"], LangValue::from("Extra"));

    // No source file: alphabetical, ordinary spaces, unescaped quotes
    let pack_json = dir.path().join("CNPack/resourcepacks/CNPack/assets/mod/lang/zh_cn.json");
    let pack = read_lang_json(&pack_json).unwrap();
    let keys: Vec<_> = pack.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a.key", "b.key"]);
    assert_eq!(pack["a.key"], LangValue::from("two words"));
    assert_eq!(pack["b.key"], LangValue::from("Say \"hi\""));

    assert!(!dir.path().join("CNPack/TM").exists());

    let merge = report.merge.expect("quest lang files are merged");
    assert_eq!(merge.output, config.merged_output);
    assert_eq!(merge.reconstructed_entries, 4);

    let merged = lang_map_from_snbt(&read_snbt(&config.merged_output).unwrap()).unwrap();
    let keys: Vec<_> = merged.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["extra.key", "quest.AB.image", "quest.AB.quest_desc", "quest.AB.title"]
    );
    assert_eq!(
        merged["quest.AB.quest_desc"],
        LangValue::Lines(vec!["第一行".to_string(), "Line2".to_string()])
    );
}

#[test]
fn test_sync_without_quest_files_skips_merge() {
    let dir = tempdir().unwrap();
    let mut source = MemorySource::default();
    source.add(7, "config/mod/lang/en_us.json", vec![item("k", "v", "值", 1)]);

    let report = sync(&config(dir.path()), &source).unwrap();
    assert!(report.merge.is_none());
    assert_eq!(report.files[0].output, dir.path().join("CNPack/config/mod/lang/zh_cn.json"));
}

#[test]
fn test_remote_failure_aborts() {
    let dir = tempdir().unwrap();
    assert!(sync(&config(dir.path()), &OfflineSource).is_err());
    assert!(!dir.path().join("CNPack").exists());
}
