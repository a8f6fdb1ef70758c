//! Square Hex board with hexagonal adjacency

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board side length used by the reference configuration.
pub const DEFAULT_DIMENSIONS: usize = 8;

/// The six hex neighbors of a cell at (r, c), as (dr, dc) offsets.
pub const HEX_NEIGHBORS: [(i32, i32); 6] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
];

/// Stone color. White connects the left and right edges, Black the top and
/// bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// State of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Stone(Color),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The stone occupying this cell, if any.
    pub fn stone(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Stone(color) => Some(color),
        }
    }
}

/// A (row, col) placement. Only meaningful for an in-bounds, empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// N x N grid of cells. Copies are deep; search code clones the board and
/// explores on the clone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    dimensions: usize,
    grid: Vec<Cell>,
}

impl Board {
    /// Create an empty board with the given side length.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            grid: vec![Cell::Empty; dimensions * dimensions],
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dimensions + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), EngineError> {
        if row >= self.dimensions || col >= self.dimensions {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                dimensions: self.dimensions,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, EngineError> {
        self.check_bounds(row, col)?;
        Ok(self.grid[self.index(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), EngineError> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.grid[idx] = cell;
        Ok(())
    }

    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        self.set(row, col, Cell::Empty)
    }

    /// Place a stone for `color` at `mv`.
    pub fn place(&mut self, mv: Move, color: Color) -> Result<(), EngineError> {
        self.set(mv.row, mv.col, Cell::Stone(color))
    }

    /// Run `f` with a trial stone placed at `mv`, restoring the cell to empty
    /// on the way out. Search code uses this so the board is guaranteed to be
    /// back in its pre-call state after every explored branch.
    pub fn with_trial_move<T>(
        &mut self,
        mv: Move,
        color: Color,
        f: impl FnOnce(&mut Board) -> T,
    ) -> Result<T, EngineError> {
        self.place(mv, color)?;
        let out = f(self);
        self.clear(mv.row, mv.col)?;
        Ok(out)
    }

    /// All empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.dimensions {
            for col in 0..self.dimensions {
                if self.grid[self.index(row, col)].is_empty() {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub fn count_empty(&self) -> usize {
        self.grid.iter().filter(|cell| cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    pub fn count_stones(&self, color: Color) -> usize {
        self.grid
            .iter()
            .filter(|cell| cell.stone() == Some(color))
            .count()
    }

    /// True if `color`'s stones form a chain between its two edges
    /// (left-right for White, top-bottom for Black).
    ///
    /// Iterative flood fill: seed with every own stone on the starting edge,
    /// then walk hex neighbors of the same color until the far edge is
    /// reached or the region is exhausted.
    pub fn is_connected(&self, color: Color) -> bool {
        let n = self.dimensions;
        if n == 0 {
            return false;
        }

        let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for i in 0..n {
            let (row, col) = match color {
                Color::White => (i, 0),
                Color::Black => (0, i),
            };
            if self.grid[self.index(row, col)] == Cell::Stone(color) {
                visited.insert((row, col));
                stack.push((row, col));
            }
        }

        while let Some((row, col)) = stack.pop() {
            let on_far_edge = match color {
                Color::White => col == n - 1,
                Color::Black => row == n - 1,
            };
            if on_far_edge {
                return true;
            }

            for (dr, dc) in HEX_NEIGHBORS {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if r < 0 || c < 0 || r >= n as i32 || c >= n as i32 {
                    continue;
                }
                let (r, c) = (r as usize, c as usize);
                if self.grid[self.index(r, c)] == Cell::Stone(color) && visited.insert((r, c)) {
                    stack.push((r, c));
                }
            }
        }

        false
    }

    /// Two-distance heuristic score for `color`; see [`crate::eval`].
    pub fn evaluate(&self, color: Color) -> f64 {
        crate::eval::evaluate(self, color)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dimensions {
            for col in 0..self.dimensions {
                let token = match self.grid[self.index(row, col)] {
                    Cell::Empty => '.',
                    Cell::Stone(Color::White) => 'W',
                    Cell::Stone(Color::Black) => 'B',
                };
                write!(f, "{token} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
