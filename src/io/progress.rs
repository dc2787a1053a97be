//! Progress display for parameter searches

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

static SEARCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Candidate counter shared by every search worker
///
/// Workers only touch the bar and an atomic counter, so one instance can be
/// borrowed across the whole pool.
pub struct SearchProgress {
    bar: ProgressBar,
    accepted: AtomicUsize,
}

impl SearchProgress {
    /// Visible bar over `total` candidates
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(SEARCH_STYLE.clone());
        Self {
            bar,
            accepted: AtomicUsize::new(0),
        }
    }

    /// Counter that draws nothing
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self {
            bar,
            accepted: AtomicUsize::new(0),
        }
    }

    /// Record one evaluated candidate
    pub fn advance(&self, accepted: bool) {
        if accepted {
            let count = self.accepted.fetch_add(1, Ordering::Relaxed) + 1;
            self.bar.set_message(format!("{count} accepted"));
        }
        self.bar.inc(1);
    }

    /// Candidates evaluated so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Candidates accepted so far
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Leave the final count on screen
    pub fn finish(&self) {
        self.bar
            .finish_with_message(format!("{} accepted", self.accepted()));
    }
}
