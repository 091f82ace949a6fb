//! Terminal progress display for generation runs
//!
//! Bridges the engine's outbound progress events to an indicatif bar.
//! The display lives on the caller's side of the channel; the engine
//! never depends on it.

use crate::algorithm::control::GenerationProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:<22} [{bar:40.cyan/blue}] {pos:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Renders generation progress events as a single terminal bar
pub struct GenerationDisplay {
    bar: ProgressBar,
}

impl Default for GenerationDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationDisplay {
    /// Create a fresh percent-scaled progress bar
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(GENERATION_STYLE.clone());
        Self { bar }
    }

    /// Reflect one progress event on the bar
    ///
    /// The bar restarts from the event's percent whenever the stage
    /// changes, so each stage sweeps 0-100 in turn.
    pub fn observe(&self, progress: &GenerationProgress) {
        self.bar.set_position(u64::from(progress.percent));
        self.bar.set_message(progress.stage.to_string());
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
