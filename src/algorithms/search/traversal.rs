use std::collections::VecDeque;

use crate::algorithms::common::{Expansion, SearchStrategy};
use crate::grid::{Grid, Position};
use crate::scheduler::CancelToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Queue order: breadth-first.
    Fifo,
    /// Stack order: depth-first.
    Lifo,
}

/// Uninformed traversal shared by BFS and DFS. Cells are marked visited
/// when discovered, not when taken from the frontier.
pub struct Traversal {
    discipline: Discipline,
    frontier: VecDeque<Position>,
}

impl Traversal {
    pub fn new(discipline: Discipline) -> Self {
        Traversal {
            discipline,
            frontier: VecDeque::new(),
        }
    }

    pub fn breadth_first() -> Self {
        Self::new(Discipline::Fifo)
    }

    pub fn depth_first() -> Self {
        Self::new(Discipline::Lifo)
    }

    fn take(&mut self) -> Option<Position> {
        match self.discipline {
            Discipline::Fifo => self.frontier.pop_front(),
            Discipline::Lifo => self.frontier.pop_back(),
        }
    }
}

impl SearchStrategy for Traversal {
    fn seed(&mut self, grid: &mut Grid, start: Position, _end: Position) {
        let cell = grid.cell_mut(start);
        cell.is_visited = true;
        cell.distance = 0;
        self.frontier.push_back(start);
    }

    fn expand(&mut self, grid: &mut Grid, end: Position, cancel: &CancelToken) -> Expansion {
        let Some(current) = self.take() else {
            return Expansion::Exhausted;
        };
        if current == end {
            return Expansion::Reached;
        }

        let distance = grid.cell(current).distance;
        let neighbors: Vec<Position> = grid.neighbors(current).collect();
        for next in neighbors {
            if cancel.is_cancelled() {
                return Expansion::Cancelled;
            }
            let cell = grid.cell_mut(next);
            if !cell.is_visited {
                cell.is_visited = true;
                cell.distance = distance + 1;
                cell.previous = Some(current);
                self.frontier.push_back(next);
            }
        }
        Expansion::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(strategy: &mut Traversal, grid: &mut Grid, start: Position, end: Position) {
        grid.reset_search_state();
        strategy.seed(grid, start, end);
    }

    #[test]
    fn breadth_first_discovers_in_neighbor_order() {
        let mut grid = Grid::new(3, 3);
        let mut bfs = Traversal::breadth_first();
        let end = Position::new(2, 2);
        seeded(&mut bfs, &mut grid, Position::new(1, 1), end);

        assert_eq!(bfs.expand(&mut grid, end, &CancelToken::new()), Expansion::Continue);
        let discovered: Vec<_> = bfs.frontier.iter().copied().collect();
        assert_eq!(
            discovered,
            vec![
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(0, 1),
            ]
        );
        assert!(discovered.iter().all(|p| grid.cell(*p).distance == 1));
    }

    #[test]
    fn depth_first_takes_last_discovered() {
        let mut grid = Grid::new(3, 3);
        let mut dfs = Traversal::depth_first();
        let end = Position::new(2, 2);
        seeded(&mut dfs, &mut grid, Position::new(0, 0), end);

        dfs.expand(&mut grid, end, &CancelToken::new());
        assert_eq!(dfs.take(), Some(Position::new(0, 1)));
    }

    #[test]
    fn exhausted_frontier_reports_failure() {
        let mut grid = Grid::with_walls(3, 1, [Position::new(1, 0)]);
        let mut bfs = Traversal::breadth_first();
        let end = Position::new(2, 0);
        seeded(&mut bfs, &mut grid, Position::new(0, 0), end);

        let cancel = CancelToken::new();
        assert_eq!(bfs.expand(&mut grid, end, &cancel), Expansion::Continue);
        assert_eq!(bfs.expand(&mut grid, end, &cancel), Expansion::Exhausted);
    }

    #[test]
    fn cancellation_stops_mid_expansion() {
        let mut grid = Grid::new(3, 3);
        let mut bfs = Traversal::breadth_first();
        let end = Position::new(2, 2);
        seeded(&mut bfs, &mut grid, Position::new(1, 1), end);

        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(bfs.expand(&mut grid, end, &cancel), Expansion::Cancelled);
        assert_eq!(grid.visited_count(), 1);
    }
}
