//! Step-by-step comparison sorts.
//!
//! [`Sorter`] yields one [`SortSnapshot`] after every assignment into the
//! working sequence. Pure comparisons only bump counters.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use crate::algorithms::common::{Progress, SortStrategy};
use crate::error::{Result, VisualizerError};
use crate::scheduler::CancelToken;
use crate::statistics::{RunStats, SortOutcome};

use bubble::Bubble;
use insertion::Insertion;
use merge::Merge;
use quick::Quick;
use selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Selection,
    Merge,
    Quick,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Selection,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Quick => "quick",
        }
    }

    fn strategy<T>(self, len: usize) -> Box<dyn SortStrategy<T>>
    where
        T: PartialOrd + Clone + 'static,
    {
        match self {
            SortAlgorithm::Bubble => Box::new(Bubble::new()),
            SortAlgorithm::Insertion => Box::new(Insertion::<T>::new()),
            SortAlgorithm::Selection => Box::new(Selection::new()),
            SortAlgorithm::Merge => Box::new(Merge::<T>::new(len)),
            SortAlgorithm::Quick => Box::new(Quick::<T>::new(len)),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortAlgorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|a| a.id() == s)
            .ok_or_else(|| VisualizerError::UnknownAlgorithm {
                kind: "sorting",
                id: s.to_string(),
                expected: "bubble, insertion, selection, merge, quick",
            })
    }
}

/// Sequence contents and counters right after one write.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSnapshot<T> {
    pub values: Vec<T>,
    pub stats: RunStats,
}

/// A sorting run over a working copy of the caller's values.
pub struct Sorter<T> {
    algorithm: SortAlgorithm,
    values: Vec<T>,
    stats: RunStats,
    started: Instant,
    strategy: Box<dyn SortStrategy<T>>,
    cancel: CancelToken,
    outcome: Option<SortOutcome>,
}

impl<T> Sorter<T>
where
    T: PartialOrd + Clone + 'static,
{
    pub fn new(algorithm: SortAlgorithm, values: &[T], cancel: CancelToken) -> Self {
        Sorter {
            algorithm,
            values: values.to_vec(),
            stats: RunStats::default(),
            started: Instant::now(),
            strategy: algorithm.strategy(values.len()),
            cancel,
            outcome: None,
        }
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// `None` while the sort can still produce steps.
    pub fn outcome(&self) -> Option<SortOutcome> {
        self.outcome
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    fn finish(&mut self, outcome: SortOutcome) -> Option<SortSnapshot<T>> {
        self.stats.elapsed = self.started.elapsed();
        debug!(
            algorithm = %self.algorithm,
            %outcome,
            comparisons = self.stats.comparisons,
            swaps = self.stats.swaps,
            "sort finished"
        );
        self.outcome = Some(outcome);
        None
    }
}

impl<T> Iterator for Sorter<T>
where
    T: PartialOrd + Clone + 'static,
{
    type Item = SortSnapshot<T>;

    fn next(&mut self) -> Option<SortSnapshot<T>> {
        if self.outcome.is_some() {
            return None;
        }
        match self.strategy.advance(&mut self.values, &mut self.stats, &self.cancel) {
            Progress::Wrote => {
                self.stats.elapsed = self.started.elapsed();
                Some(SortSnapshot {
                    values: self.values.clone(),
                    stats: self.stats,
                })
            }
            Progress::Finished => self.finish(SortOutcome::Sorted),
            Progress::Cancelled => self.finish(SortOutcome::Cancelled),
        }
    }
}
