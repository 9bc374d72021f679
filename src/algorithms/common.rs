use crate::grid::{Grid, Position};
use crate::scheduler::CancelToken;
use crate::statistics::RunStats;

/// Result of processing one frontier node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Node expanded; the grid changed and should be shown.
    Continue,
    /// The end cell was taken from the frontier.
    Reached,
    /// Frontier is empty and the end was never reached.
    Exhausted,
    /// Cancellation observed part way through the expansion.
    Cancelled,
}

pub trait SearchStrategy {
    /// Seeds the frontier on a grid whose search state was just reset.
    fn seed(&mut self, grid: &mut Grid, start: Position, end: Position);

    /// Takes one node from the frontier and expands it.
    fn expand(&mut self, grid: &mut Grid, end: Position, cancel: &CancelToken) -> Expansion;
}

/// Result of advancing a sort to its next visible write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Wrote,
    Finished,
    Cancelled,
}

pub trait SortStrategy<T> {
    /// Runs comparisons until the next assignment into `values` and performs
    /// it. Counters in `stats` are bumped once per logical operation.
    fn advance(&mut self, values: &mut [T], stats: &mut RunStats, cancel: &CancelToken) -> Progress;
}
