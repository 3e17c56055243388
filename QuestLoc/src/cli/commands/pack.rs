//! CLI command for packaging resource directories

use std::path::Path;

use anyhow::Context;

use crate::cli::progress::{PACKAGE, print_step};
use crate::tools::{PackConfig, pack_directories};

pub fn execute(config: &Path, target_dir: &Path) -> anyhow::Result<()> {
    let pack_config = PackConfig::from_file(config)
        .with_context(|| format!("Failed to read packer config {}", config.display()))?;

    let total = pack_config.paths.len();
    let report = pack_directories(&pack_config, target_dir)?;
    for (i, archive) in report.archives.iter().enumerate() {
        print_step(
            i + 1,
            total,
            PACKAGE,
            &format!("{} -> {} ({} files)", archive.source.display(), archive.archive.display(), archive.files),
        );
    }
    Ok(())
}
