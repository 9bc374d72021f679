use crate::algorithms::common::{Progress, SortStrategy};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Quick sort with Lomuto partitioning around the last element.
///
/// Ranges still to be partitioned live on an explicit stack; the left part is
/// pushed last so it is handled before the right one, as in the recursive form.
pub struct Quick<T> {
    ranges: Vec<(usize, usize)>,
    active: Option<Partition<T>>,
}

struct Partition<T> {
    lo: usize,
    hi: usize,
    pivot: T,
    /// Next slot for an element smaller than the pivot.
    store: usize,
    j: usize,
}

impl<T> Quick<T> {
    pub fn new(len: usize) -> Self {
        let mut ranges = Vec::new();
        if len > 1 {
            ranges.push((0, len - 1));
        }
        Quick {
            ranges,
            active: None,
        }
    }
}

impl<T: PartialOrd + Clone> SortStrategy<T> for Quick<T> {
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress {
        loop {
            if cancel.is_cancelled() {
                return Progress::Cancelled;
            }

            let Some(part) = self.active.as_mut() else {
                match self.ranges.pop() {
                    Some((lo, hi)) => {
                        self.active = Some(Partition {
                            lo,
                            hi,
                            pivot: values[hi].clone(),
                            store: lo,
                            j: lo,
                        });
                        continue;
                    }
                    None => return Progress::Finished,
                }
            };

            if part.j < part.hi {
                let j = part.j;
                part.j += 1;
                stats.comparisons += 1;
                if values[j] < part.pivot {
                    values.swap(part.store, j);
                    part.store += 1;
                    stats.swaps += 1;
                    return Progress::Wrote;
                }
                continue;
            }

            let (lo, hi, p) = (part.lo, part.hi, part.store);
            values.swap(p, hi);
            stats.swaps += 1;
            self.active = None;
            if p + 1 < hi {
                self.ranges.push((p + 1, hi));
            }
            if p > lo + 1 {
                self.ranges.push((lo, p - 1));
            }
            return Progress::Wrote;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithms::sort::testing::drain;
    use crate::algorithms::sort::SortAlgorithm;

    #[test]
    fn hand_traced_lomuto_run() {
        let (steps, sorter) = drain(SortAlgorithm::Quick, &[5, 3, 1, 4, 2]);
        assert_eq!(sorter.values(), &[1, 2, 3, 4, 5]);
        assert_eq!(sorter.stats().comparisons, 7);
        assert_eq!(sorter.stats().swaps, 5);

        let frames: Vec<Vec<i32>> = steps.into_iter().map(|s| s.values).collect();
        assert_eq!(
            frames,
            vec![
                vec![1, 3, 5, 4, 2], // 1 < pivot 2
                vec![1, 2, 5, 4, 3], // pivot 2 placed
                vec![1, 2, 3, 4, 5], // pivot 3 placed
                vec![1, 2, 3, 4, 5], // 4 < pivot 5, swapped in place
                vec![1, 2, 3, 4, 5], // pivot 5 placed
            ]
        );
    }

    #[test]
    fn left_partition_is_sorted_first() {
        let (steps, sorter) = drain(SortAlgorithm::Quick, &[3, 4, 1, 2, 0, 5, 2]);
        let frames: Vec<Vec<i32>> = steps.into_iter().map(|s| s.values).collect();
        assert_eq!(
            frames,
            vec![
                vec![1, 4, 3, 2, 0, 5, 2],
                vec![1, 0, 3, 2, 4, 5, 2],
                vec![1, 0, 2, 2, 4, 5, 3], // pivot 2 placed at 2
                vec![0, 1, 2, 2, 4, 5, 3], // left range [0, 1]
                vec![0, 1, 2, 2, 4, 5, 3],
                vec![0, 1, 2, 2, 3, 5, 4],
                vec![0, 1, 2, 2, 3, 4, 5],
            ]
        );
        assert_eq!(sorter.stats().comparisons, 6 + 1 + 3 + 1);
    }
}
