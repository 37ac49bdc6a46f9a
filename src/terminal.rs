use std::io;
use std::io::Stdout;
use std::io::Write;

use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::error;
use tracing::info;

use crate::CellSize;
use crate::Pixel;
use crate::canvas::BrailleCanvas;
use crate::canvas::DOTS_PER_COL;
use crate::canvas::DOTS_PER_ROW;
use crate::grid::Grid;
use crate::grid::Viewport;
use crate::render::Render;
use crate::render::RenderError;

/// Draws the grid in a terminal, one braille dot per pixel.
///
/// The last terminal row is kept for a status line.
pub struct TerminalSurface<W: Write> {
    out: W,
    canvas: BrailleCanvas,

    /// Terminal columns
    cols: u16,

    /// Terminal rows used by the canvas. The status line sits right below.
    rows: u16,

    status: String,

    /// Whether we own raw mode, the alternate screen and mouse capture
    attached: bool,
}

impl TerminalSurface<Stdout> {
    /// Take over the terminal: raw mode, alternate screen and mouse capture.
    ///
    /// Everything is given back by [`Render::detach`], or on drop.
    pub fn acquire() -> Result<Self, RenderError> {
        let (cols, rows) = terminal::size()?;

        if cols == 0 || rows < 2 {
            return Err(RenderError::Unavailable(format!(
                "terminal is too small ({cols}x{rows})"
            )));
        }

        terminal::enable_raw_mode()?;

        // from here on, dropping the surface gives raw mode back
        let surface = Self::new(io::stdout(), cols, rows).attach()?;

        info!(cols, rows, "Acquired terminal");

        Ok(surface)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// A surface writing to `out`, which is `cols` by `rows` characters. The terminal modes are
    /// left alone.
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let rows = rows.saturating_sub(1);

        Self {
            out,
            canvas: BrailleCanvas::for_terminal(cols, rows),
            cols,
            rows,
            status: String::new(),
            attached: false,
        }
    }

    /// Mark the terminal as ours, then switch to the alternate screen with mouse capture. If
    /// switching fails, the returned error drops the surface, which restores the terminal.
    fn attach(mut self) -> Result<Self, RenderError> {
        self.attached = true;

        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )?;

        Ok(self)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// The pixel under the terminal character at `(column, row)`, or `None` for the status line.
    pub fn pixel_at(&self, column: u16, row: u16) -> Option<(Pixel, Pixel)> {
        if row >= self.rows {
            return None;
        }

        Some((column as Pixel * DOTS_PER_COL, row as Pixel * DOTS_PER_ROW))
    }

    /// Redraw only the status line.
    pub fn render_status(&mut self) -> Result<(), RenderError> {
        // writing the last column of the last row scrolls some terminals
        let width = self.cols.saturating_sub(1) as usize;
        let status: String = self.status.chars().take(width).collect();

        queue!(
            self.out,
            cursor::MoveTo(0, self.rows),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(status)
        )?;
        self.out.flush()?;

        Ok(())
    }

    pub fn into_inner(mut self) -> W
    where
        W: Default,
    {
        std::mem::take(&mut self.out)
    }
}

impl<W: Write> Render for TerminalSurface<W> {
    fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }

    fn render(&mut self, grid: &Grid, cell_size: CellSize) -> Result<(), RenderError> {
        self.canvas.draw(grid, cell_size);

        for (i, line) in self.canvas.render().lines().enumerate() {
            queue!(self.out, cursor::MoveTo(0, i as u16), style::Print(line))?;
        }

        self.render_status()
    }

    fn pointer_pixel(&self, column: u16, row: u16) -> Option<(Pixel, Pixel)> {
        self.pixel_at(column, row)
    }

    fn detach(&mut self) -> Result<(), RenderError> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;

        let screen = execute!(
            self.out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let raw = terminal::disable_raw_mode();
        screen?;
        raw?;

        info!("Released terminal");

        Ok(())
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        if let Err(err) = self.detach() {
            error!(?err, "Failed to restore terminal");
        }
    }
}
