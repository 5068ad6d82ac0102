use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Character used to render a live cell.
pub const ALIVE: char = '#';

/// Character used to render a dead cell. It is also the only character read back as dead.
pub const DEAD: char = ' ';

/// A cell address on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Pattern has no rows")]
    EmptyPattern,

    #[error("Row {row} of the pattern is empty")]
    EmptyRow { row: usize },

    #[error("Row {row} has length {len}, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Grid must be at least 1x1, got {rows}x{cols}")]
    ZeroSize { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl GridError {
    /// Whether the error comes from a malformed pattern rather than a bad cell address.
    pub fn is_format(&self) -> bool {
        !matches!(self, GridError::OutOfBounds { .. })
    }
}

/// A rectangular, edge-wrapping matrix of cells.
///
/// Cells are stored row-major. Every row has exactly `cols` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Default for Grid {
    /// A 3x3 grid with only the centre cell alive.
    fn default() -> Self {
        let mut cells = vec![false; 9];
        cells[4] = true;

        Self {
            rows: 3,
            cols: 3,
            cells,
        }
    }
}

impl Grid {
    /// Create an all-dead grid.
    pub fn dead(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroSize { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Fails with [`GridError::OutOfBounds`] unless `pos` addresses a cell of this grid.
    pub fn check(&self, pos: Pos) -> Result<Pos, GridError> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, pos: Pos) -> Result<bool, GridError> {
        let pos = self.check(pos)?;

        Ok(self.cells[self.index(pos)])
    }

    pub fn set(&mut self, pos: Pos, alive: bool) -> Result<(), GridError> {
        let pos = self.check(pos)?;

        self.put(pos, alive);

        Ok(())
    }

    /// Reads a cell already known to be in bounds.
    #[inline]
    pub(crate) fn at(&self, pos: Pos) -> bool {
        self.cells[self.index(pos)]
    }

    /// Writes a cell already known to be in bounds.
    #[inline]
    pub(crate) fn put(&mut self, pos: Pos, alive: bool) {
        let i = self.index(pos);
        self.cells[i] = alive;
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Every cell address, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let cols = self.cols;

        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Pos { row, col }))
    }

    /// Overwrite this grid with the cells of `other`, which must have the same shape.
    pub(crate) fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));

        self.cells.copy_from_slice(&other.cells);
    }

    // The four orthogonal steps wrap one dimension each. `pos` must be in bounds.

    pub fn left(&self, pos: Pos) -> Pos {
        let col = if pos.col > 0 { pos.col - 1 } else { self.cols - 1 };

        Pos { col, ..pos }
    }

    pub fn right(&self, pos: Pos) -> Pos {
        let col = if pos.col < self.cols - 1 { pos.col + 1 } else { 0 };

        Pos { col, ..pos }
    }

    pub fn top(&self, pos: Pos) -> Pos {
        let row = if pos.row > 0 { pos.row - 1 } else { self.rows - 1 };

        Pos { row, ..pos }
    }

    pub fn bottom(&self, pos: Pos) -> Pos {
        let row = if pos.row < self.rows - 1 { pos.row + 1 } else { 0 };

        Pos { row, ..pos }
    }

    // Diagonals are always built from the orthogonal steps, horizontal step first.

    pub fn top_left(&self, pos: Pos) -> Pos {
        self.top(self.left(pos))
    }

    pub fn top_right(&self, pos: Pos) -> Pos {
        self.top(self.right(pos))
    }

    pub fn bottom_left(&self, pos: Pos) -> Pos {
        self.bottom(self.left(pos))
    }

    pub fn bottom_right(&self, pos: Pos) -> Pos {
        self.bottom(self.right(pos))
    }

    /// The eight toroidal neighbours of `pos`, in the order left, right, top, bottom, bottom-left,
    /// bottom-right, top-left, top-right.
    ///
    /// On grids narrower or shorter than 3 cells some neighbours coincide, and a cell may be its
    /// own neighbour. Each entry is still counted separately.
    pub fn neighbours(&self, pos: Pos) -> [Pos; 8] {
        [
            self.left(pos),
            self.right(pos),
            self.top(pos),
            self.bottom(pos),
            self.bottom_left(pos),
            self.bottom_right(pos),
            self.top_left(pos),
            self.top_right(pos),
        ]
    }

    /// Number of live cells among the neighbours of `pos`. `pos` must be in bounds.
    pub fn live_neighbours(&self, pos: Pos) -> u8 {
        self.neighbours(pos)
            .into_iter()
            .filter(|&n| self.at(n))
            .count() as u8
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn dead_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| !alive).count()
    }

    /// One string per row, `#` for live cells and a space for dead ones.
    pub fn render(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&alive| render_cell(alive)).collect())
            .collect()
    }
}

fn render_cell(alive: bool) -> char {
    if alive { ALIVE } else { DEAD }
}

/// Build a grid from text rows, where a space is a dead cell and any other character is alive.
///
/// Every row must have the same, non-zero, number of characters.
pub fn parse_grid<S: AsRef<str>>(pattern: &[S]) -> Result<Grid, GridError> {
    let Some(first) = pattern.first() else {
        return Err(GridError::EmptyPattern);
    };

    let rows = pattern.len();
    let cols = first.as_ref().chars().count();

    let mut cells = Vec::with_capacity(rows * cols);

    for (row, line) in pattern.iter().enumerate() {
        let line = line.as_ref();
        let len = line.chars().count();

        if len == 0 {
            return Err(GridError::EmptyRow { row });
        }

        if len != cols {
            return Err(GridError::Ragged {
                row,
                len,
                expected: cols,
            });
        }

        cells.extend(line.chars().map(|c| c != DEAD));
    }

    Ok(Grid { rows, cols, cells })
}

/// Render a grid as one string per row. See [`Grid::render`].
pub fn render_grid(grid: &Grid) -> Vec<String> {
    grid.render()
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parses a plaintext block with one row per line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();

        parse_grid(&lines)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &alive in row {
                write!(f, "{}", render_cell(alive))?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
