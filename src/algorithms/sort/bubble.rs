use crate::algorithms::common::{Progress, SortStrategy};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Adjacent-pair passes; pass `i` stops before the `i` settled elements.
#[derive(Debug, Default)]
pub struct Bubble {
    pass: usize,
    j: usize,
}

impl Bubble {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: PartialOrd> SortStrategy<T> for Bubble {
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress {
        let n = values.len();
        loop {
            if cancel.is_cancelled() {
                return Progress::Cancelled;
            }
            if self.pass >= n {
                return Progress::Finished;
            }
            if self.j + 1 + self.pass >= n {
                self.pass += 1;
                self.j = 0;
                continue;
            }

            let j = self.j;
            self.j += 1;
            stats.comparisons += 1;
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                stats.swaps += 1;
                return Progress::Wrote;
            }
        }
    }
}
