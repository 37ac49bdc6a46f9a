use tracing::error;

use crate::grid::CellPos;
use crate::grid::Grid;

/// Relative offsets of the 8 cells around a cell, as `(row, col)`.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The in-bounds neighbors of `pos`, excluding `pos` itself.
///
/// Grid edges are hard boundaries: a corner cell has 3 neighbors, an edge cell 5, and any other
/// cell 8.
pub fn neighbors(pos: CellPos, grid: &Grid) -> impl Iterator<Item = CellPos> + '_ {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let pos = CellPos { row, col };

        grid.contains(pos).then_some(pos)
    })
}

/// Number of living neighbors of `pos`.
pub fn live_neighbors(pos: CellPos, grid: &Grid) -> u8 {
    neighbors(pos, grid).filter(|&n| grid.is_alive(n)).count() as u8
}

/// Next state of a single cell, given whether it is alive and how many of its neighbors are.
///
/// Checked in this order:
///  - 3 neighbors: alive, whatever the current state
///  - 0 or 1 neighbors: dead
///  - 4 or more neighbors: dead
///  - 2 neighbors: unchanged
///
/// A cell can't have more than 8 neighbors. Such a count is logged and the cell dies.
pub fn evaluate(alive: bool, live_neighbors: u8) -> bool {
    match live_neighbors {
        3 => true,
        0 | 1 => false,
        4..=8 => false,
        2 => alive,
        n => {
            error!(live_neighbors = n, "Could not compute cell state");
            false
        }
    }
}

/// Compute the next generation of `grid`.
///
/// The input is left untouched, so callers can keep drawing it until the new grid is ready.
pub fn step(grid: &Grid) -> Grid {
    Grid::from_fn(grid.rows(), grid.cols(), |pos| {
        evaluate(grid.is_alive(pos), live_neighbors(pos, grid))
    })
}
