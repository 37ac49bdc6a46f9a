use std::time::Duration;
use std::time::Instant;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::CellSize;
use crate::Error;
use crate::Pixel;
use crate::coords::locate;
use crate::grid::Grid;
use crate::life;
use crate::render::Render;
use crate::render::RenderError;
use crate::timer::Interval;
use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Owns the grid, the surface it is drawn on, and the timer that advances it.
///
/// There is no background work: the driver calls [`tick`](Controller::tick) from its event loop,
/// and a generation is computed only when the timer is due. Every change to the grid is followed
/// by a render of the whole grid.
pub struct Controller<R: Render> {
    surface: R,
    grid: Grid,
    cell_size: CellSize,
    interval: Interval,

    /// `Some` while running
    timer: Option<Timer>,

    /// Steps since creation or the last reset
    generation: u64,

    destroyed: bool,
}

impl<R: Render> Controller<R> {
    /// Size a dead grid to the surface's viewport and draw it once.
    pub fn new(surface: R, cell_size: CellSize, interval: Interval) -> Result<Self, Error> {
        let grid = Grid::sized_for(surface.viewport(), cell_size)?;

        let mut controller = Self {
            surface,
            grid,
            cell_size,
            interval,
            timer: None,
            generation: 0,
            destroyed: false,
        };
        controller.render()?;

        Ok(controller)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        if self.timer.is_some() {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Start stepping once every interval. Does nothing if already running.
    pub fn start(&mut self, now: Instant) {
        if self.destroyed {
            warn!("Ignoring start on a destroyed controller");
            return;
        }

        if self.timer.is_some() {
            return;
        }

        debug!(interval_ms = self.interval.as_millis(), "Starting simulation");
        self.timer = Some(Timer::start(self.interval, now));
    }

    /// Cancel the timer. Does nothing if already stopped.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!(generation = self.generation, "Stopped simulation");
        }
    }

    /// Start if stopped, stop if running.
    pub fn toggle_running(&mut self, now: Instant) {
        match self.state() {
            RunState::Stopped => self.start(now),
            RunState::Running => self.stop(),
        }
    }

    /// Change the time between generations.
    ///
    /// A running timer is restarted with the new interval, so the next step comes one new
    /// interval after `now`. The grid is kept.
    pub fn set_speed(&mut self, interval: Interval, now: Instant) {
        debug!(interval_ms = interval.as_millis(), "Changing speed");
        self.interval = interval;

        if self.timer.is_some() {
            self.stop();
            self.start(now);
        }
    }

    /// Like `set_speed`, from a possibly fractional number of milliseconds.
    pub fn set_speed_millis(&mut self, ms: f64, now: Instant) {
        self.set_speed(Interval::from_millis_f64(ms), now);
    }

    /// Kill every cell, keeping the dimensions and the run state.
    pub fn reset(&mut self) -> Result<(), RenderError> {
        self.grid.clear();
        self.generation = 0;

        info!(rows = self.grid.rows(), cols = self.grid.cols(), "Reset grid");

        self.render()
    }

    /// Flip the cell under the pixel `(x, y)` and redraw.
    ///
    /// Clicks outside the grid are ignored. Returns whether a cell was toggled.
    pub fn click(&mut self, x: Pixel, y: Pixel) -> Result<bool, RenderError> {
        if self.destroyed {
            return Ok(false);
        }

        let pos = locate(x, y, self.cell_size);

        if let Err(e) = self.grid.toggle(pos) {
            warn!(x, y, "Ignoring click: {e}");
            return Ok(false);
        }

        self.render()?;

        Ok(true)
    }

    /// Advance one generation if running and the timer is due. Returns whether a step happened.
    ///
    /// At most one generation is computed per call, however late the call is.
    pub fn tick(&mut self, now: Instant) -> Result<bool, RenderError> {
        let Some(timer) = &mut self.timer else {
            return Ok(false);
        };

        if !timer.due(now) {
            return Ok(false);
        }

        timer.fire(now);

        self.grid = life::step(&self.grid);
        self.generation += 1;

        debug!(
            generation = self.generation,
            alive = self.grid.live_count(),
            "Stepped"
        );

        self.render()?;

        Ok(true)
    }

    /// When the next step is due, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(Timer::deadline)
    }

    /// How long the driver may wait for input before the next `tick`, capped at `max`.
    pub fn poll_timeout(&self, now: Instant, max: Duration) -> Duration {
        self.timer
            .as_ref()
            .map_or(max, |timer| timer.remaining(now).min(max))
    }

    /// Text form of the grid, see [`Grid`]'s `Display`.
    pub fn dump(&self) -> String {
        self.grid.to_string()
    }

    /// Cancel the timer and detach from the surface. Calling it again does nothing.
    pub fn destroy(&mut self) -> Result<(), RenderError> {
        if self.destroyed {
            return Ok(());
        }

        self.stop();
        self.destroyed = true;

        self.surface.detach()
    }

    fn render(&mut self) -> Result<(), RenderError> {
        // the surface is no longer ours once detached
        if self.destroyed {
            return Ok(());
        }

        self.surface.render(&self.grid, self.cell_size)
    }
}

impl<R: Render> Drop for Controller<R> {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            error!(?err, "Failed to detach from surface");
        }
    }
}
