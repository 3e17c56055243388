//! CLI progress display utilities
//!
//! Step indicators with emojis, and spinners for long-running phases.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for extraction/packing operations
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Gear - for processing operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Link - for hierarchy/merge operations
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");
/// Globe - for remote operations
pub static GLOBE: Emoji<'_, '_> = Emoji("🌐 ", "");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/3] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Step printer that stays silent in quiet mode.
#[derive(Debug, Clone, Copy)]
pub struct Steps {
    total: usize,
    quiet: bool,
}

impl Steps {
    #[must_use]
    pub fn new(total: usize, quiet: bool) -> Self {
        Self { total, quiet }
    }

    pub fn step(&self, current: usize, emoji: Emoji, msg: &str) {
        if !self.quiet {
            print_step(current, self.total, emoji, msg);
        }
    }

    pub fn done(&self, elapsed: Duration) {
        if !self.quiet {
            print_done(elapsed);
        }
    }
}

// =============================================================================
// Simple Progress Helpers
// =============================================================================

/// Create a simple spinner
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A spinner, or a hidden bar in quiet mode.
#[must_use]
pub fn spinner_unless(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        simple_spinner(msg)
    }
}
