//! CLI command for comparing two releases

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, GEAR, PACKAGE, print_done, print_step, simple_spinner};
use crate::compare::{ReportContext, compare_archives, load_template, render_html, write_report};
use crate::config::CompareConfig;

pub fn execute(old: &Path, new: &Path, config: &CompareConfig) -> anyhow::Result<()> {
    let started = Instant::now();
    // Fail on a bad template before the slow part
    let template = load_template(config.template.as_deref())?;

    print_step(1, 3, PACKAGE, &format!("Extracting {} and {}...", old.display(), new.display()));
    let pb = simple_spinner("Comparing files...");
    let result = compare_archives(old, new, config.context_lines);
    pb.finish_and_clear();
    let result = result?;

    print_step(2, 3, GEAR, &result.summary());
    let context = ReportContext::for_archives(old, new);
    let html = render_html(&result, &context, &template)?;

    write_report(&config.output, &html)?;
    print_step(3, 3, DISK, &format!("Report written to {}", config.output.display()));
    print_done(started.elapsed());
    Ok(())
}
