//! CLI command for pulling translations

use std::time::Instant;

use crate::cli::progress::{DISK, GLOBE, print_done, print_step, simple_spinner};
use crate::config::SyncConfig;
use crate::sync::{Credentials, ParatranzClient, list_syncable, sync};

pub fn execute(config: &SyncConfig, dry_run: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let credentials = Credentials::from_env()?;
    let client = ParatranzClient::new(config, &credentials)?;

    if dry_run {
        print_step(1, 1, GLOBE, "Listing remote files...");
        let (files, skipped) = list_syncable(config, &client)?;
        for file in &files {
            println!("  {} (id {})", file.name, file.id);
        }
        println!("{} files to sync, {} skipped", files.len(), skipped.len());
        return Ok(());
    }

    print_step(1, 2, GLOBE, &format!("Syncing project {}...", credentials.project_id));
    let pb = simple_spinner("Downloading translations...");
    let report = sync(config, &client);
    pb.finish_and_clear();
    let report = report?;

    print_step(2, 2, DISK, &format!("Wrote files under {}", config.output_root.display()));
    print!("{report}");
    print_done(started.elapsed());
    Ok(())
}
