//! CLI command for punctuation normalization

use std::path::Path;

use crate::tools::normalize_tree;

pub fn execute(dir: &Path) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let report = normalize_tree(dir)?;
    for path in &report.files_changed {
        println!("Updated {}", path.display());
    }
    println!(
        "{} JSON files checked, {} changed",
        report.files_checked,
        report.files_changed.len()
    );
    Ok(())
}
