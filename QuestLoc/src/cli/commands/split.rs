//! CLI command for splitting the source language file

use std::time::Instant;

use crate::cli::progress::{DISK, LOOKING_GLASS, Steps, spinner_unless};
use crate::config::Config;
use crate::lang::{SplitOptions, split};

pub fn execute(config: &Config, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let options = SplitOptions::from_config(config);
    let steps = Steps::new(2, quiet);

    steps.step(
        1,
        LOOKING_GLASS,
        &format!(
            "Reading {} and chapters in {}...",
            options.source_lang.display(),
            options.chapters_dir.display()
        ),
    );
    let pb = spinner_unless(quiet, "Splitting...");
    let report = split(&options);
    pb.finish_and_clear();
    let report = report?;

    steps.step(2, DISK, &format!("Wrote {} files to {}", report.files.len(), options.output_dir.display()));
    if !quiet {
        print!("{report}");
        if report.unlinked_entries > 0 {
            println!("{} entries belong to no chapter", report.unlinked_entries);
        }
    }
    steps.done(started.elapsed());
    Ok(())
}
