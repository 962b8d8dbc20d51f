use indicatif::ProgressBar;
use serde::Serialize;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info};

use geowiki_core::RankedPage;

use crate::index::{JoinIndex, SlotId};

/// Join tallies for one match pass. `found + missing` is the number of pages
/// offered; `duplicate_hits` is the subset of `found` that landed on an
/// already-ranked slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub found: u64,
    pub missing: u64,
    pub duplicate_hits: u64,
}

impl MatchStats {
    pub fn total(&self) -> u64 { self.found + self.missing }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Attached(SlotId),
    /// Key matched but the slot already carries a page, which is kept.
    AlreadyRanked(SlotId),
    Missing,
}

/// Sole mutator of the index during the match pass.
pub struct Matcher {
    index: JoinIndex,
    stats: MatchStats,
    log_sample: u64,
    progress: ProgressBar,
}

impl Matcher {
    pub fn new(index: JoinIndex, log_sample: usize) -> Self {
        Self { index, stats: MatchStats::default(), log_sample: log_sample as u64, progress: ProgressBar::hidden() }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn stats(&self) -> MatchStats { self.stats }

    pub fn index(&self) -> &JoinIndex { &self.index }

    pub fn into_parts(self) -> (JoinIndex, MatchStats) { (self.index, self.stats) }

    /// Look up one page and attach it on a hit. A miss is counted, never an
    /// error.
    pub fn offer(&mut self, page: RankedPage) -> MatchOutcome {
        let sampled = self.stats.total() < self.log_sample;
        if sampled { debug!("Looking up '{}' in the lookup table", page.title); }
        self.progress.inc(1);

        let Some(slot) = self.index.lookup(&page.title) else {
            if sampled { debug!("Missing! title: '{}'", page.title); }
            self.stats.missing += 1;
            return MatchOutcome::Missing;
        };

        self.stats.found += 1;
        let title = page.title.clone();
        match self.index.attach(slot, page) {
            Ok(()) => {
                if sampled { debug!("Found! title: '{}'", title); }
                MatchOutcome::Attached(slot)
            }
            Err(rejected) => {
                if sampled {
                    debug!(slot = slot.index(), order = rejected.order, "Slot already ranked, keeping the first page for '{}'", title);
                }
                self.stats.duplicate_hits += 1;
                MatchOutcome::AlreadyRanked(slot)
            }
        }
    }

    /// Match every page until the producer closes the queue.
    pub async fn run(mut self, mut rx: Receiver<RankedPage>) -> (JoinIndex, MatchStats) {
        while let Some(page) = rx.recv().await {
            self.offer(page);
        }
        self.progress.finish_and_clear();
        info!("Found: {}, Missing: {}", self.stats.found, self.stats.missing);
        self.into_parts()
    }
}
