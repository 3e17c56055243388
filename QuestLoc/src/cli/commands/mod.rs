use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Config;

pub mod compare;
pub mod merge;
pub mod pack;
pub mod punct;
pub mod split;
pub mod sync;

#[derive(Subcommand)]
pub enum Commands {
    /// Split the source language file into per-chapter JSON for translators
    Split {
        /// Source language SNBT file
        #[arg(long)]
        source_lang: Option<PathBuf>,

        /// Directory of chapter SNBT files
        #[arg(long)]
        chapters_dir: Option<PathBuf>,

        /// Output directory for JSON files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Language prefix of generated file names
        #[arg(long)]
        lang: Option<String>,

        /// Write single-line lists without an index suffix
        #[arg(long)]
        flatten_single_lines: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Merge translated JSON files back into an SNBT language file
    Merge {
        /// Directory of translated JSON files
        #[arg(long)]
        json_dir: Option<PathBuf>,

        /// Output SNBT file
        #[arg(long)]
        output_snbt: Option<PathBuf>,

        /// Only merge files whose name starts with this prefix (e.g., "zh_cn")
        #[arg(long)]
        prefix: Option<String>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compare two release archives and write an HTML report
    Compare {
        /// Older release (.zip, .tar or .tar.gz)
        old: PathBuf,

        /// Newer release (.zip, .tar or .tar.gz)
        new: PathBuf,

        /// Report output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Custom HTML template
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Pull translations from the translation platform
    Sync {
        /// Only list the remote files that would be synced
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace English punctuation between translated characters in JSON files
    Punct {
        /// Directory to process recursively
        dir: PathBuf,
    },

    /// Zip resource directories listed in a JSON config
    Pack {
        /// Packer config file ({ "paths": [...] })
        config: PathBuf,

        /// Directory the archives are written to
        #[arg(long, default_value = "target_folder")]
        target_dir: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self, mut config: Config) -> anyhow::Result<()> {
        match self {
            Commands::Split {
                source_lang,
                chapters_dir,
                output_dir,
                lang,
                flatten_single_lines,
                quiet,
            } => {
                let split = &mut config.split;
                if let Some(path) = source_lang {
                    split.source_lang.clone_from(path);
                }
                if let Some(path) = chapters_dir {
                    split.chapters_dir.clone_from(path);
                }
                if let Some(path) = output_dir {
                    split.output_dir.clone_from(path);
                }
                if let Some(lang) = lang {
                    split.lang.clone_from(lang);
                }
                split.flatten_single_lines |= *flatten_single_lines;
                split::execute(&config, *quiet)
            }
            Commands::Merge {
                json_dir,
                output_snbt,
                prefix,
                quiet,
            } => {
                if let Some(path) = json_dir {
                    config.split.output_dir.clone_from(path);
                }
                if let Some(path) = output_snbt {
                    config.split.output_snbt.clone_from(path);
                }
                merge::execute(&config, prefix.as_deref(), *quiet)
            }
            Commands::Compare {
                old,
                new,
                output,
                template,
            } => {
                if let Some(path) = output {
                    config.compare.output.clone_from(path);
                }
                if template.is_some() {
                    config.compare.template.clone_from(template);
                }
                compare::execute(old, new, &config.compare)
            }
            Commands::Sync { dry_run } => sync::execute(&config.sync, *dry_run),
            Commands::Punct { dir } => punct::execute(dir),
            Commands::Pack { config: pack_config, target_dir } => pack::execute(pack_config, target_dir),
        }
    }
}
