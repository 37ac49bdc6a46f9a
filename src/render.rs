use std::io;

use thiserror::Error;

use crate::CellSize;
use crate::Pixel;
use crate::grid::Grid;
use crate::grid::Viewport;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Could not acquire a drawing surface: {0}")]
    Unavailable(String),

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Something the current grid can be drawn on.
///
/// Implementors draw every cell of the grid as a filled `cell_size` square at
/// [`cell_rect`](crate::coords::cell_rect), colored by whether the cell is alive.
pub trait Render {
    /// Size of the drawable area, in pixels.
    fn viewport(&self) -> Viewport;

    fn render(&mut self, grid: &Grid, cell_size: CellSize) -> Result<(), RenderError>;

    /// The pixel under a pointer event at `(column, row)`, in the units the surface's input
    /// reports, or `None` when the pointer is outside the drawable area.
    fn pointer_pixel(&self, column: u16, row: u16) -> Option<(Pixel, Pixel)> {
        Some((column.into(), row.into()))
    }

    /// Stop delivering input and give back whatever the surface holds. Called once, on teardown.
    fn detach(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<R: Render + ?Sized> Render for &mut R {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn render(&mut self, grid: &Grid, cell_size: CellSize) -> Result<(), RenderError> {
        (**self).render(grid, cell_size)
    }

    fn pointer_pixel(&self, column: u16, row: u16) -> Option<(Pixel, Pixel)> {
        (**self).pointer_pixel(column, row)
    }

    fn detach(&mut self) -> Result<(), RenderError> {
        (**self).detach()
    }
}
