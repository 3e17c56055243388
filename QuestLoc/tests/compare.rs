use std::fs::File;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use questloc::archive::zip_directory;
use questloc::compare::{DEFAULT_TEMPLATE, ModifiedContent, write_report};
use questloc::prelude::*;
use tempfile::tempdir;

fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (name, contents) in files {
        let path = root.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

fn old_release(root: &Path) {
    write_tree(
        root,
        &[
            ("config/quests.snbt", b"one\ntwo\nthree\n"),
            ("pack.mcmeta", b"{}"),
            ("gone.txt", b"x"),
            ("icon.png", &[0x89, 0x50, 0xff, 0xfe, 0x00, 0x01]),
        ],
    );
}

fn new_release(root: &Path) {
    write_tree(
        root,
        &[
            ("config/quests.snbt", b"one\n2\nthree\n"),
            ("pack.mcmeta", b"{}"),
            ("kubejs/added.js", b"// <new>"),
            ("icon.png", &[0x89, 0x50, 0xff, 0xfe, 0x00, 0x02]),
        ],
    );
}

fn tar_gz(source: &Path, files: &[&str], archive: &Path) {
    let encoder = GzEncoder::new(File::create(archive).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for name in files {
        builder.append_path_with_name(source.join(name), name).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

#[test]
fn test_compare_zip_releases() {
    let dir = tempdir().unwrap();
    old_release(&dir.path().join("old"));
    new_release(&dir.path().join("new"));
    let old_zip = dir.path().join("v1.0.zip");
    let new_zip = dir.path().join("v1.1.zip");
    zip_directory(dir.path().join("old"), &old_zip).unwrap();
    zip_directory(dir.path().join("new"), &new_zip).unwrap();

    let result = compare_archives(&old_zip, &new_zip, 2).unwrap();
    assert_eq!(result.added, vec!["kubejs/added.js".to_string()]);
    assert_eq!(result.removed, vec!["gone.txt".to_string()]);
    assert_eq!(result.identical, vec!["pack.mcmeta".to_string()]);

    let modified: Vec<_> = result.modified.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(modified, vec!["config/quests.snbt", "icon.png"]);
    match &result.modified[0].content {
        ModifiedContent::Text(diff) => {
            assert_eq!((diff.stats.added, diff.stats.removed), (1, 1));
            assert_eq!(diff.hunks.len(), 1);
            assert_eq!(diff.hunks[0].header, "@@ -1,3 +1,3 @@");
        }
        other => panic!("expected a text diff, got {other:?}"),
    }
    assert_eq!(result.modified[1].content, ModifiedContent::Binary);

    let context = ReportContext::for_archives(&old_zip, &new_zip);
    let html = render_html(&result, &context, DEFAULT_TEMPLATE).unwrap();
    assert!(html.contains("v1.0.zip"));
    assert!(html.contains("gone.txt"));
    assert!(html.contains("Binary file, contents changed."));
    assert!(!html.contains("${"));

    let report = dir.path().join("reports/comparison_report.html");
    write_report(&report, &html).unwrap();
    assert_eq!(std::fs::read_to_string(report).unwrap(), html);
}

#[test]
fn test_compare_zip_against_tar_gz() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("release");
    new_release(&source);

    let zip = dir.path().join("release.zip");
    let tarball = dir.path().join("release.tar.gz");
    zip_directory(&source, &zip).unwrap();
    tar_gz(
        &source,
        &["config/quests.snbt", "pack.mcmeta", "kubejs/added.js", "icon.png"],
        &tarball,
    );

    let result = compare_archives(&zip, &tarball, 2).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.identical.len(), 4);
}

#[test]
fn test_missing_archive() {
    let dir = tempdir().unwrap();
    let zip = dir.path().join("present.zip");
    std::fs::create_dir_all(dir.path().join("src")).unwrap();
    zip_directory(dir.path().join("src"), &zip).unwrap();

    assert!(matches!(
        compare_archives(&zip, dir.path().join("absent.zip"), 2),
        Err(Error::ArchiveNotFound(_))
    ));
}

#[test]
fn test_late_invalid_utf8_renders_inline_error() {
    let dir = tempdir().unwrap();
    let mut broken = vec![b'a'; 2000];
    broken.push(0xff);
    write_tree(&dir.path().join("old"), &[("lang/big.txt", b"short\n")]);
    write_tree(&dir.path().join("new"), &[("lang/big.txt", &broken)]);
    let old_zip = dir.path().join("old.zip");
    let new_zip = dir.path().join("new.zip");
    zip_directory(dir.path().join("old"), &old_zip).unwrap();
    zip_directory(dir.path().join("new"), &new_zip).unwrap();

    let result = compare_archives(&old_zip, &new_zip, 2).unwrap();
    assert_eq!(result.modified.len(), 1);
    let ModifiedContent::Unreadable(reason) = &result.modified[0].content else {
        panic!("expected an unreadable file, got {:?}", result.modified[0].content);
    };
    assert!(reason.starts_with("lang/big.txt: "), "{reason}");

    let context = ReportContext::for_archives(&old_zip, &new_zip);
    let html = render_html(&result, &context, DEFAULT_TEMPLATE).unwrap();
    assert!(html.contains("<p class=\"diff-error\">Could not read file for comparison: lang/big.txt: "));
    assert!(!html.contains(&*std::env::temp_dir().to_string_lossy()));
}
