pub mod canvas;
pub mod config;
pub mod controller;
pub mod coords;
pub mod driver;
pub mod events;
pub mod grid;
pub mod io;
pub mod life;
pub mod render;
pub mod terminal;
pub mod timer;

use thiserror::Error;

/// A length or coordinate on a drawing surface.
pub type Pixel = u32;

/// Edge length of a square cell, in pixels.
pub type CellSize = Pixel;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Grid error: {0}")]
    Grid(#[from] grid::GridError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
