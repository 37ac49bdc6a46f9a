use crate::CellSize;
use crate::Pixel;
use crate::grid::CellPos;

/// An axis-aligned square in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: Pixel,
    pub y: Pixel,
    pub side: Pixel,
}

impl Rect {
    pub fn contains(&self, x: Pixel, y: Pixel) -> bool {
        (self.x..self.x + self.side).contains(&x) && (self.y..self.y + self.side).contains(&y)
    }
}

/// Maps a pixel coordinate to the cell drawn under it.
///
/// No bounds checking happens here. The grid is sized with an extra row and column (see
/// [`Grid::sized_for`](crate::grid::Grid::sized_for)), so any pixel inside the viewport maps to a
/// cell of the grid.
///
/// Panics if `cell_size` is `0`.
pub fn locate(x: Pixel, y: Pixel, cell_size: CellSize) -> CellPos {
    CellPos {
        row: (y / cell_size) as usize,
        col: (x / cell_size) as usize,
    }
}

/// The square a renderer fills for the cell at `pos`.
pub fn cell_rect(pos: CellPos, cell_size: CellSize) -> Rect {
    Rect {
        x: pos.col as Pixel * cell_size,
        y: pos.row as Pixel * cell_size,
        side: cell_size,
    }
}
