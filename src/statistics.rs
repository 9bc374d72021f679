use std::fmt;
use std::time::Duration;

use crate::grid::Grid;

/// Counters carried alongside every sorting snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
}

impl RunStats {
    /// Counter-only equality, ignoring wall-clock time.
    pub fn same_counts(&self, other: &RunStats) -> bool {
        self.comparisons == other.comparisons && self.swaps == other.swaps
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Comparisons: {} | Swaps: {} | Time: {:.2?}",
            self.comparisons, self.swaps, self.elapsed
        )
    }
}

/// How a pathfinding run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// End reached and the path fully traced.
    Found,
    /// Frontier exhausted before reaching the end.
    Unreachable,
    Cancelled,
}

/// How a sorting run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    Sorted,
    Cancelled,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchOutcome::Found => "path found",
            SearchOutcome::Unreachable => "no path",
            SearchOutcome::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

impl fmt::Display for SortOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOutcome::Sorted => "sorted",
            SortOutcome::Cancelled => "cancelled",
        })
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub algorithm: &'static str,
    pub outcome: SearchOutcome,
    /// Terminal grid state.
    pub grid: Grid,
    pub snapshots: usize,
    pub visited: usize,
    pub path_length: usize,
}

impl SearchReport {
    pub fn new(algorithm: &'static str, outcome: SearchOutcome, grid: Grid, snapshots: usize) -> Self {
        SearchReport {
            algorithm,
            outcome,
            visited: grid.visited_count(),
            path_length: grid.path_length(),
            grid,
            snapshots,
        }
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Outcome: {}", self.outcome)?;
        writeln!(f, "Cells visited: {}", self.visited)?;
        writeln!(f, "Path length: {}", self.path_length)?;
        writeln!(f, "Steps emitted: {}", self.snapshots)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SortReport<T> {
    pub algorithm: &'static str,
    pub outcome: SortOutcome,
    pub values: Vec<T>,
    pub stats: RunStats,
    pub snapshots: usize,
}

impl<T> fmt::Display for SortReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Outcome: {}", self.outcome)?;
        writeln!(f, "{}", self.stats)?;
        writeln!(f, "Steps emitted: {}", self.snapshots)?;
        Ok(())
    }
}
