use pathfinding::prelude::bfs;
use rand::Rng;
use std::fmt::Write as _;

use crate::error::{Result, VisualizerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Manhattan distance, the A* heuristic for 4-directional unit moves.
    /// Saturates at `u32::MAX` rather than wrapping.
    pub fn manhattan(self, other: Position) -> u32 {
        let hops = self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y));
        u32::try_from(hops).unwrap_or(u32::MAX)
    }
}

/// Movement directions in expansion order: up, right, down, left.
const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    pub is_wall: bool,
    pub is_visited: bool,
    pub is_path: bool,
    /// Hops from the start, `Cell::UNREACHED` until discovered.
    pub distance: u32,
    /// A* only: `distance + heuristic`.
    pub score: u32,
    /// Predecessor on the best known path. Always points back toward the start.
    pub previous: Option<Position>,
}

impl Cell {
    pub const UNREACHED: u32 = u32::MAX;

    fn open(position: Position) -> Self {
        Cell {
            position,
            is_wall: false,
            is_visited: false,
            is_path: false,
            distance: Self::UNREACHED,
            score: Self::UNREACHED,
            previous: None,
        }
    }

    fn reset_search_state(&mut self) {
        self.is_visited = false;
        self.is_path = false;
        self.distance = Self::UNREACHED;
        self.score = Self::UNREACHED;
        self.previous = None;
    }
}

/// Fixed-size rectangular grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::open(Position::new(x, y))))
            .collect();
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Builds a grid with the given wall positions. Out-of-range walls are ignored.
    pub fn with_walls(width: usize, height: usize, walls: impl IntoIterator<Item = Position>) -> Self {
        let mut grid = Grid::new(width, height);
        for pos in walls {
            if grid.contains(pos) {
                grid.set_wall(pos, true);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Row-major index of `pos`. Callers must pass an in-range position.
    pub fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos), "{pos:?} outside {}x{} grid", self.width, self.height);
        pos.y * self.width + pos.x
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = self.index(pos);
        &mut self.cells[idx]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn set_wall(&mut self, pos: Position, is_wall: bool) {
        self.cell_mut(pos).is_wall = is_wall;
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.cell(pos).is_wall
    }

    /// In-range, non-wall neighbours of `pos` in the order up, right, down, left.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dx, dy)| {
            let x = pos.x.checked_add_signed(dx)?;
            let y = pos.y.checked_add_signed(dy)?;
            let next = Position::new(x, y);
            (self.contains(next) && !self.is_wall(next)).then_some(next)
        })
    }

    /// Clears everything a search writes, keeping walls.
    pub fn reset_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_search_state);
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_visited).count()
    }

    pub fn path_length(&self) -> usize {
        self.cells.iter().filter(|c| c.is_path).count()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall).count()
    }

    /// Checks that `pos` can serve as a start or end point.
    pub fn validate_endpoint(&self, pos: Position) -> Result<()> {
        if !self.contains(pos) {
            return Err(VisualizerError::OutOfBounds {
                position: pos,
                width: self.width,
                height: self.height,
            });
        }
        if self.is_wall(pos) {
            return Err(VisualizerError::BlockedEndpoint(pos));
        }
        Ok(())
    }

    /// Optimal hop count between two cells, computed independently of the
    /// animated engines.
    pub fn shortest_hops(&self, start: Position, end: Position) -> Option<usize> {
        bfs(
            &start,
            |p| self.neighbors(*p).collect::<Vec<_>>(),
            |p| *p == end,
        )
        .map(|path| path.len().saturating_sub(1))
    }

    /// Places up to `count` random walls, never on a position in `keep_clear`.
    pub fn scatter_walls<R: Rng>(&mut self, count: usize, keep_clear: &[Position], rng: &mut R) {
        let free = self
            .cells
            .iter()
            .filter(|c| !c.is_wall && !keep_clear.contains(&c.position))
            .count();
        let count = count.min(free);
        let max_attempts = count.saturating_mul(3);
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < count && attempts < max_attempts {
            let pos = Position::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height));
            if !keep_clear.contains(&pos) && !self.is_wall(pos) {
                self.set_wall(pos, true);
                walls_placed += 1;
            }
            attempts += 1;
        }
    }

    /// ASCII frame: S=start, E=end, #=wall, *=path, o=visited, .=empty
    pub fn render(&self, start: Position, end: Position) -> String {
        let mut out = String::with_capacity((self.width * 2 + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let cell = self.cell(pos);
                let glyph = if pos == start {
                    'S'
                } else if pos == end {
                    'E'
                } else if cell.is_path {
                    '*'
                } else if cell.is_visited {
                    'o'
                } else if cell.is_wall {
                    '#'
                } else {
                    '.'
                };
                let _ = write!(out, "{} ", glyph);
            }
            out.push('\n');
        }
        out
    }
}
