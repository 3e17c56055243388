//! CLI command for merging translated JSON back into SNBT

use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{DISK, LINK, Steps};
use crate::config::Config;
use crate::lang::{MergeOptions, merge};

pub fn execute(config: &Config, prefix: Option<&str>, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut options = MergeOptions::from_config(config);
    options.prefix = prefix.map(str::to_string);
    let steps = Steps::new(2, quiet);

    steps.step(1, LINK, &format!("Merging JSON files in {}...", options.json_dir.display()));
    let report = merge(&options)
        .with_context(|| format!("Failed to merge {}", options.json_dir.display()))?;

    steps.step(2, DISK, &report.to_string());
    steps.done(started.elapsed());
    Ok(())
}
