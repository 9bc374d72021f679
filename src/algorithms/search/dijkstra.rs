use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::algorithms::common::{Expansion, SearchStrategy};
use crate::grid::{Grid, Position};
use crate::scheduler::CancelToken;

/// Priority of an unvisited cell: `(distance, wave, row-major index)`.
///
/// `wave` is the iteration in which the distance was assigned. Ordering on
/// this triple picks the same cell as re-sorting the row-major list of
/// unvisited cells with a stable sort on every iteration: equal distances
/// keep the order in which they were reached, and cells reached in the same
/// iteration keep grid order.
type Key = (u32, u64, usize);

/// Dijkstra with unit edge weights.
pub struct Dijkstra {
    unvisited: BinaryHeap<Reverse<Key>>,
    wave: u64,
}

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra {
            unvisited: BinaryHeap::new(),
            wave: 0,
        }
    }

    /// Nearest reached cell that is still unvisited.
    fn closest(&mut self, grid: &Grid) -> Option<Position> {
        while let Some(Reverse((_, _, index))) = self.unvisited.pop() {
            let pos = grid.position_of(index);
            if !grid.cell(pos).is_visited {
                return Some(pos);
            }
        }
        None
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStrategy for Dijkstra {
    fn seed(&mut self, grid: &mut Grid, start: Position, _end: Position) {
        grid.cell_mut(start).distance = 0;
        self.unvisited.push(Reverse((0, self.wave, grid.index(start))));
    }

    fn expand(&mut self, grid: &mut Grid, end: Position, cancel: &CancelToken) -> Expansion {
        // Everything left is unreached once no reached cell remains.
        let Some(current) = self.closest(grid) else {
            return Expansion::Exhausted;
        };
        self.wave += 1;

        let distance = {
            let cell = grid.cell_mut(current);
            cell.is_visited = true;
            cell.distance
        };
        if current == end {
            return Expansion::Reached;
        }

        let neighbors: Vec<Position> = grid.neighbors(current).collect();
        for next in neighbors {
            if cancel.is_cancelled() {
                return Expansion::Cancelled;
            }
            let index = grid.index(next);
            let cell = grid.cell_mut(next);
            if cell.is_visited {
                continue;
            }
            let candidate = distance + 1;
            if candidate < cell.distance {
                cell.distance = candidate;
                cell.previous = Some(current);
                self.unvisited.push(Reverse((candidate, self.wave, index)));
            }
        }
        Expansion::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    /// Selection order of the textbook formulation: keep every cell in a
    /// row-major list and stable-sort it by distance on each iteration.
    fn reference_order(grid: &Grid, start: Position, end: Position) -> Vec<Position> {
        let mut grid = grid.clone();
        grid.reset_search_state();
        grid.cell_mut(start).distance = 0;
        let mut unvisited: Vec<Position> = grid.cells().map(|c| c.position).collect();
        let mut order = Vec::new();

        while !unvisited.is_empty() {
            unvisited.sort_by_key(|p| grid.cell(*p).distance);
            let current = unvisited.remove(0);
            let distance = grid.cell(current).distance;
            if distance == Cell::UNREACHED {
                break;
            }
            grid.cell_mut(current).is_visited = true;
            order.push(current);
            if current == end {
                break;
            }
            let neighbors: Vec<_> = grid.neighbors(current).collect();
            for next in neighbors {
                let cell = grid.cell_mut(next);
                if !cell.is_visited && distance + 1 < cell.distance {
                    cell.distance = distance + 1;
                    cell.previous = Some(current);
                }
            }
        }
        order
    }

    fn heap_order(grid: &Grid, start: Position, end: Position) -> Vec<Position> {
        let mut grid = grid.clone();
        grid.reset_search_state();
        let mut dijkstra = Dijkstra::new();
        dijkstra.seed(&mut grid, start, end);
        let cancel = CancelToken::new();
        let mut order = Vec::new();

        loop {
            let before: Vec<bool> = grid.cells().map(|c| c.is_visited).collect();
            let step = dijkstra.expand(&mut grid, end, &cancel);
            if let Some(newly) = grid
                .cells()
                .zip(before)
                .find(|(cell, was)| cell.is_visited && !was)
            {
                order.push(newly.0.position);
            }
            if step != Expansion::Continue {
                break;
            }
        }
        order
    }

    #[test]
    fn selection_order_matches_stable_sort_on_open_grid() {
        let grid = Grid::new(5, 4);
        let start = Position::new(2, 1);
        let end = Position::new(4, 3);
        assert_eq!(heap_order(&grid, start, end), reference_order(&grid, start, end));
    }

    #[test]
    fn selection_order_matches_stable_sort_with_walls() {
        let walls = [(1, 0), (1, 1), (1, 2), (3, 1), (3, 2), (3, 3), (2, 4)]
            .into_iter()
            .map(|(x, y)| Position::new(x, y));
        let grid = Grid::with_walls(5, 5, walls);
        let start = Position::new(0, 0);
        let end = Position::new(4, 4);
        assert_eq!(heap_order(&grid, start, end), reference_order(&grid, start, end));
    }

    #[test]
    fn unreachable_end_exhausts() {
        let walls = (0..3).map(|y| Position::new(1, y));
        let mut grid = Grid::with_walls(3, 3, walls);
        let end = Position::new(2, 2);
        let mut dijkstra = Dijkstra::new();
        dijkstra.seed(&mut grid, Position::new(0, 0), end);

        let cancel = CancelToken::new();
        let mut steps = 0;
        while dijkstra.expand(&mut grid, end, &cancel) == Expansion::Continue {
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert!(!grid.cell(end).is_visited);
    }
}
