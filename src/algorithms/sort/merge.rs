use std::collections::VecDeque;

use crate::algorithms::common::{Progress, SortStrategy};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Inclusive `(lo, mid, hi)` bounds of one merge.
type Span = (usize, usize, usize);

/// Top-down merge sort.
///
/// Which ranges get merged, and in what order, depends only on the length,
/// so the recursion is flattened up front into its post-order list of
/// merges. Each merge then writes one element per step.
pub struct Merge<T> {
    pending: VecDeque<Span>,
    active: Option<MergeRun<T>>,
}

struct MergeRun<T> {
    left: Vec<T>,
    right: Vec<T>,
    i: usize,
    j: usize,
    k: usize,
}

impl<T: Clone> MergeRun<T> {
    fn new(values: &[T], (lo, mid, hi): Span) -> Self {
        MergeRun {
            left: values[lo..=mid].to_vec(),
            right: values[mid + 1..=hi].to_vec(),
            i: 0,
            j: 0,
            k: lo,
        }
    }
}

fn plan(lo: usize, hi: usize, out: &mut VecDeque<Span>) {
    if lo < hi {
        let mid = (lo + hi) / 2;
        plan(lo, mid, out);
        plan(mid + 1, hi, out);
        out.push_back((lo, mid, hi));
    }
}

impl<T> Merge<T> {
    pub fn new(len: usize) -> Self {
        let mut pending = VecDeque::new();
        if len > 1 {
            plan(0, len - 1, &mut pending);
        }
        Merge {
            pending,
            active: None,
        }
    }
}

impl<T: PartialOrd + Clone> SortStrategy<T> for Merge<T> {
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress {
        loop {
            if cancel.is_cancelled() {
                return Progress::Cancelled;
            }

            let Some(run) = self.active.as_mut() else {
                match self.pending.pop_front() {
                    Some(span) => {
                        self.active = Some(MergeRun::new(values, span));
                        continue;
                    }
                    None => return Progress::Finished,
                }
            };

            let has_left = run.i < run.left.len();
            let has_right = run.j < run.right.len();
            let take_left = match (has_left, has_right) {
                (true, true) => {
                    stats.comparisons += 1;
                    run.left[run.i] <= run.right[run.j]
                }
                (true, false) => true,
                (false, true) => false,
                (false, false) => {
                    self.active = None;
                    continue;
                }
            };

            if take_left {
                values[run.k] = run.left[run.i].clone();
                run.i += 1;
            } else {
                values[run.k] = run.right[run.j].clone();
                run.j += 1;
            }
            run.k += 1;
            stats.swaps += 1;
            return Progress::Wrote;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sort::testing::drain;
    use crate::algorithms::sort::SortAlgorithm;

    #[test]
    fn plan_follows_recursion_order() {
        let merges: Vec<Span> = Merge::<i32>::new(5).pending.into_iter().collect();
        assert_eq!(merges, vec![(0, 0, 1), (0, 1, 2), (3, 3, 4), (0, 2, 4)]);
    }

    #[test]
    fn every_write_is_a_step() {
        let (steps, sorter) = drain(SortAlgorithm::Merge, &[4, 3, 2, 1]);
        assert_eq!(sorter.values(), &[1, 2, 3, 4]);
        // 2 + 2 + 4 writes
        assert_eq!(steps.len(), 8);
        assert_eq!(sorter.stats().swaps, 8);
        // one comparison per pair merge, then 2 before the left half drains
        assert_eq!(sorter.stats().comparisons, 4);
        assert_eq!(steps[0].values, vec![3, 3, 2, 1]);
    }

    #[test]
    fn equal_keys_keep_their_order() {
        // Pairs compare on the first field only.
        #[derive(Debug, Clone, PartialEq)]
        struct Tagged(i32, char);
        impl PartialOrd for Tagged {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(&other.0)
            }
        }

        let input = vec![Tagged(2, 'a'), Tagged(1, 'b'), Tagged(2, 'c'), Tagged(1, 'd')];
        let (_, sorter) = drain(SortAlgorithm::Merge, &input);
        let tags: String = sorter.values().iter().map(|t| t.1).collect();
        assert_eq!(tags, "bdac");
    }
}
