use crate::algorithms::common::{Progress, SortStrategy};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Scans the unsorted suffix for its minimum and swaps it into place. A pass
/// whose minimum is already in place produces no step.
#[derive(Debug, Default)]
pub struct Selection {
    position: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: PartialOrd> SortStrategy<T> for Selection {
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress {
        let n = values.len();
        loop {
            if cancel.is_cancelled() {
                return Progress::Cancelled;
            }
            if self.position + 1 >= n {
                return Progress::Finished;
            }

            let i = self.position;
            let mut min = i;
            for j in i + 1..n {
                if cancel.is_cancelled() {
                    return Progress::Cancelled;
                }
                stats.comparisons += 1;
                if values[j] < values[min] {
                    min = j;
                }
            }

            self.position += 1;
            if min != i {
                values.swap(i, min);
                stats.swaps += 1;
                return Progress::Wrote;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::sort::testing::drain;
    use crate::algorithms::sort::SortAlgorithm;

    #[test]
    fn one_step_per_moved_minimum() {
        let (steps, sorter) = drain(SortAlgorithm::Selection, &[2, 1, 3, 0]);
        let frames: Vec<Vec<i32>> = steps.into_iter().map(|s| s.values).collect();
        assert_eq!(frames, vec![vec![0, 1, 3, 2], vec![0, 1, 2, 3]]);
        assert_eq!(sorter.stats().comparisons, 6);
        assert_eq!(sorter.stats().swaps, 2);
    }

    #[test]
    fn sorted_input_needs_no_swaps() {
        let (steps, sorter) = drain(SortAlgorithm::Selection, &[1, 1, 2, 5]);
        assert!(steps.is_empty());
        assert_eq!(sorter.stats().swaps, 0);
    }
}
