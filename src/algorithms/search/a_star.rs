use rustc_hash::FxHashSet;

use crate::algorithms::common::{Expansion, SearchStrategy};
use crate::grid::{Grid, Position};
use crate::scheduler::CancelToken;

/// A* over the grid with the Manhattan heuristic.
///
/// The open list is re-sorted by score on every iteration with a stable
/// sort, so equal scores are taken in the order the list already holds them.
#[derive(Default)]
pub struct AStar {
    open: Vec<Position>,
    in_open: FxHashSet<Position>,
    closed: FxHashSet<Position>,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    fn pop_best(&mut self, grid: &Grid) -> Option<Position> {
        if self.open.is_empty() {
            return None;
        }
        self.open.sort_by_key(|p| grid.cell(*p).score);
        let best = self.open.remove(0);
        self.in_open.remove(&best);
        Some(best)
    }
}

impl SearchStrategy for AStar {
    fn seed(&mut self, grid: &mut Grid, start: Position, end: Position) {
        let cell = grid.cell_mut(start);
        cell.distance = 0;
        cell.score = start.manhattan(end);
        self.open.push(start);
        self.in_open.insert(start);
    }

    fn expand(&mut self, grid: &mut Grid, end: Position, cancel: &CancelToken) -> Expansion {
        let Some(current) = self.pop_best(grid) else {
            return Expansion::Exhausted;
        };
        if current == end {
            return Expansion::Reached;
        }

        self.closed.insert(current);
        let distance = {
            let cell = grid.cell_mut(current);
            cell.is_visited = true;
            cell.distance
        };

        let neighbors: Vec<Position> = grid.neighbors(current).collect();
        for next in neighbors {
            if cancel.is_cancelled() {
                return Expansion::Cancelled;
            }
            if self.closed.contains(&next) {
                continue;
            }

            let tentative = distance + 1;
            if self.in_open.insert(next) {
                self.open.push(next);
            } else if tentative >= grid.cell(next).distance {
                continue;
            }

            let cell = grid.cell_mut(next);
            cell.previous = Some(current);
            cell.distance = tentative;
            cell.score = tentative.saturating_add(next.manhattan(end));
        }
        Expansion::Continue
    }
}
