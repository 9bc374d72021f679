use crate::algorithms::common::{Progress, SortStrategy};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Shifts larger elements right one slot at a time, then drops the key into
/// the hole. Each shift counts as one comparison and one swap; the final
/// placement is shown but not counted.
#[derive(Debug)]
pub struct Insertion<T> {
    next: usize,
    /// Key being inserted and the slot it would currently occupy.
    carrying: Option<(T, usize)>,
}

impl<T> Insertion<T> {
    pub fn new() -> Self {
        Insertion {
            next: 1,
            carrying: None,
        }
    }
}

impl<T> Default for Insertion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialOrd + Clone> SortStrategy<T> for Insertion<T> {
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress {
        loop {
            if cancel.is_cancelled() {
                return Progress::Cancelled;
            }

            let Some((key, hole)) = self.carrying.take() else {
                if self.next >= values.len() {
                    return Progress::Finished;
                }
                self.carrying = Some((values[self.next].clone(), self.next));
                continue;
            };

            if hole > 0 && values[hole - 1] > key {
                stats.comparisons += 1;
                values[hole] = values[hole - 1].clone();
                stats.swaps += 1;
                self.carrying = Some((key, hole - 1));
                return Progress::Wrote;
            }

            values[hole] = key;
            self.next += 1;
            return Progress::Wrote;
        }
    }
}
