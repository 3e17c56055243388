//! # QuestLoc
//!
//! Localization pipeline for FTB Quests modpacks.
//!
//! ## Features
//!
//! - **SNBT** - Read and write the FTB Quests text format
//! - **Split / Merge** - Turn a quest language file into per-chapter JSON for
//!   translators, and rebuild the SNBT language file from translated JSON
//! - **Compare** - HTML diff report between two release archives
//! - **Sync** - Pull translations from a Paratranz project into the repository
//! - **Tools** - Punctuation normalization and resource pack packaging
//!
//! ## Quick Start
//!
//! ### Splitting a language file
//!
//! ```no_run
//! use questloc::config::Config;
//! use questloc::lang::{SplitOptions, split};
//!
//! let config = Config::load(None)?;
//! let report = split(&SplitOptions::from_config(&config))?;
//! println!("{}", report.summary());
//! # Ok::<(), questloc::Error>(())
//! ```
//!
//! ### Rebuilding the SNBT file
//!
//! ```no_run
//! use questloc::config::Config;
//! use questloc::lang::{MergeOptions, merge};
//!
//! let config = Config::load(None)?;
//! merge(&MergeOptions::from_config(&config))?;
//! # Ok::<(), questloc::Error>(())
//! ```
//!
//! ### Comparing releases
//!
//! ```no_run
//! use questloc::compare::{ReportContext, compare_archives, render_html, write_report, DEFAULT_TEMPLATE};
//!
//! let result = compare_archives("v1.0.zip", "v1.1.zip", 2)?;
//! let context = ReportContext::for_archives("v1.0.zip".as_ref(), "v1.1.zip".as_ref());
//! let html = render_html(&result, &context, DEFAULT_TEMPLATE)?;
//! write_report("comparison_report.html", &html)?;
//! # Ok::<(), questloc::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `questloc` command-line binary

pub mod archive;
pub mod compare;
pub mod config;
pub mod error;
pub mod formats;
pub mod lang;
pub mod sync;
pub mod tools;
pub mod utils;

pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::formats::{FlatMap, LangMap, LangValue, SnbtValue, parse_snbt, read_snbt, write_snbt};

    pub use crate::lang::{
        Categorizer, FlattenMode, Hierarchy, HierarchicalSorter, MergeOptions, MergeReport,
        SplitOptions, SplitReport, escape, flatten, merge, reconstruct, split, unescape,
    };

    pub use crate::compare::{ComparisonResult, ReportContext, compare_archives, render_html};

    pub use crate::sync::{Credentials, ParatranzClient, SyncReport, TranslationSource, sync};

    pub use crate::tools::{PackConfig, normalize_punctuation, pack_directories};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
