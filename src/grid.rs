use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::CellSize;
use crate::Pixel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("A grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },

    #[error("Row {row} has {len} cells, expected {cols}")]
    Ragged { row: usize, len: usize, cols: usize },

    #[error("Cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("Cell ({row}, {col}) is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// A `(row, col)` location on a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Size of a drawable area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: Pixel,
    pub height: Pixel,
}

impl Viewport {
    pub const fn new(width: Pixel, height: Pixel) -> Self {
        Self { width, height }
    }
}

/// Life state of every cell, stored as rows of columns.
///
/// `true` is alive. Every row has the same length, and there is always at least one row and one
/// column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Create a `rows` by `cols` grid where every cell is dead.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }

        Ok(Self {
            cells: vec![vec![false; cols]; rows],
        })
    }

    /// Create a grid that covers `viewport` with square cells of side `cell_size`.
    ///
    /// One extra row and column are added so that a click anywhere in the viewport, including on
    /// its bottom and right edge, lands on a cell.
    pub fn sized_for(viewport: Viewport, cell_size: CellSize) -> Result<Self, GridError> {
        let (rows, cols) = Self::dimensions_for(viewport, cell_size)?;
        let grid = Self::new(rows, cols)?;

        info!(rows, cols, cell_size, "Created grid");

        Ok(grid)
    }

    /// The `(rows, cols)` that [`Grid::sized_for`] would use.
    pub fn dimensions_for(
        viewport: Viewport,
        cell_size: CellSize,
    ) -> Result<(usize, usize), GridError> {
        if cell_size == 0 {
            return Err(GridError::ZeroCellSize);
        }

        let rows = (viewport.height / cell_size) as usize + 1;
        let cols = (viewport.width / cell_size) as usize + 1;

        Ok((rows, cols))
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        // never empty, see `Grid::new`
        self.cells[0].len()
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }

    /// State of the cell at `pos`, or `None` if it lies outside the grid.
    pub fn get(&self, pos: CellPos) -> Option<bool> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    /// Like `get`, but cells outside the grid count as dead.
    pub fn is_alive(&self, pos: CellPos) -> bool {
        self.get(pos).unwrap_or(false)
    }

    pub fn set(&mut self, pos: CellPos, alive: bool) -> Result<(), GridError> {
        let cell = self.cell_mut(pos)?;
        *cell = alive;

        Ok(())
    }

    /// Flip the cell at `pos` in place. No other cell is touched.
    pub fn toggle(&mut self, pos: CellPos) -> Result<(), GridError> {
        let cell = self.cell_mut(pos)?;
        *cell = !*cell;

        Ok(())
    }

    /// Kill every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(false);
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }

    /// Every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, bool)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &alive)| (CellPos::new(row, col), alive))
        })
    }

    /// Build a grid from explicit rows. Every row must have the same, non-zero length.
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);

        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyDimensions { rows, cols });
        }

        if let Some(row) = cells.iter().position(|row| row.len() != cols) {
            return Err(GridError::Ragged {
                row,
                len: cells[row].len(),
                cols,
            });
        }

        Ok(Self { cells })
    }

    pub(crate) fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(CellPos) -> bool,
    {
        let cells = (0..rows)
            .map(|row| (0..cols).map(|col| f(CellPos::new(row, col))).collect())
            .collect();

        Self { cells }
    }

    fn cell_mut(&mut self, pos: CellPos) -> Result<&mut bool, GridError> {
        let (rows, cols) = (self.rows(), self.cols());

        self.cells
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .ok_or(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows,
                cols,
            })
    }
}

/// One line per row, `#` for a living cell and `.` for a dead one.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for &alive in row {
                write!(f, "{}", if alive { '#' } else { '.' })?;
            }
        }

        Ok(())
    }
}
