//! Step-by-step grid search.
//!
//! [`Search`] is an iterator of grid snapshots: one per frontier expansion,
//! then one per cell marked while tracing the path back from the end.

pub mod a_star;
pub mod dijkstra;
pub mod traversal;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::algorithms::common::{Expansion, SearchStrategy};
use crate::error::{Result, VisualizerError};
use crate::grid::{Grid, Position};
use crate::scheduler::CancelToken;
use crate::statistics::SearchOutcome;

use a_star::AStar;
use dijkstra::Dijkstra;
use traversal::Traversal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathAlgorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 4] = [
        PathAlgorithm::Bfs,
        PathAlgorithm::Dfs,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::AStar,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PathAlgorithm::Bfs => "bfs",
            PathAlgorithm::Dfs => "dfs",
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::AStar => "astar",
        }
    }

    fn strategy(self) -> Box<dyn SearchStrategy> {
        match self {
            PathAlgorithm::Bfs => Box::new(Traversal::breadth_first()),
            PathAlgorithm::Dfs => Box::new(Traversal::depth_first()),
            PathAlgorithm::Dijkstra => Box::new(Dijkstra::new()),
            PathAlgorithm::AStar => Box::new(AStar::new()),
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PathAlgorithm {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bfs" => Ok(PathAlgorithm::Bfs),
            "dfs" => Ok(PathAlgorithm::Dfs),
            "dijkstra" => Ok(PathAlgorithm::Dijkstra),
            "astar" | "a_star" => Ok(PathAlgorithm::AStar),
            _ => Err(VisualizerError::UnknownAlgorithm {
                kind: "pathfinding",
                id: s.to_string(),
                expected: "bfs, dfs, dijkstra, astar",
            }),
        }
    }
}

enum Phase {
    Exploring,
    /// Walking `previous` links; holds the next cell to mark.
    Tracing(Position),
    Done(SearchOutcome),
}

/// A search run over a private copy of the caller's grid.
pub struct Search {
    algorithm: PathAlgorithm,
    grid: Grid,
    end: Position,
    strategy: Box<dyn SearchStrategy>,
    phase: Phase,
    cancel: CancelToken,
}

impl Search {
    /// Copies `grid`, resets its search state and seeds the frontier.
    /// Start and end must be in range and not walls.
    pub fn new(
        algorithm: PathAlgorithm,
        grid: &Grid,
        start: Position,
        end: Position,
        cancel: CancelToken,
    ) -> Result<Self> {
        grid.validate_endpoint(start)?;
        grid.validate_endpoint(end)?;

        let mut grid = grid.clone();
        grid.reset_search_state();
        let mut strategy = algorithm.strategy();
        strategy.seed(&mut grid, start, end);

        Ok(Search {
            algorithm,
            grid,
            end,
            strategy,
            phase: Phase::Exploring,
            cancel,
        })
    }

    pub fn algorithm(&self) -> PathAlgorithm {
        self.algorithm
    }

    /// Current working grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// `None` while the search can still produce steps.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.phase {
            Phase::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn finish(&mut self, outcome: SearchOutcome) -> Option<Grid> {
        debug!(
            algorithm = %self.algorithm,
            %outcome,
            visited = self.grid.visited_count(),
            path = self.grid.path_length(),
            "search finished"
        );
        self.phase = Phase::Done(outcome);
        None
    }
}

impl Iterator for Search {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        loop {
            if matches!(self.phase, Phase::Done(_)) {
                return None;
            }
            if self.cancel.is_cancelled() {
                return self.finish(SearchOutcome::Cancelled);
            }

            match self.phase {
                Phase::Exploring => {
                    match self.strategy.expand(&mut self.grid, self.end, &self.cancel) {
                        Expansion::Continue => return Some(self.grid.clone()),
                        Expansion::Reached => self.phase = Phase::Tracing(self.end),
                        Expansion::Exhausted => return self.finish(SearchOutcome::Unreachable),
                        Expansion::Cancelled => return self.finish(SearchOutcome::Cancelled),
                    }
                }
                Phase::Tracing(current) => {
                    let Some(previous) = self.grid.cell(current).previous else {
                        return self.finish(SearchOutcome::Found);
                    };
                    self.grid.cell_mut(current).is_path = true;
                    self.phase = Phase::Tracing(previous);
                    return Some(self.grid.clone());
                }
                Phase::Done(_) => return None,
            }
        }
    }
}
