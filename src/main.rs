use std::io;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::event;
use tracing_subscriber::EnvFilter;

use canvas_life::CellSize;
use canvas_life::config::Config;
use canvas_life::controller::Controller;
use canvas_life::driver;
use canvas_life::driver::Flow;
use canvas_life::terminal::TerminalSurface;
use canvas_life::timer::Interval;

/// Longest we block waiting for input, so the status line stays fresh
const MAX_POLL: Duration = Duration::from_millis(100);

/// Default cell edge in braille dots: two terminal characters wide, one tall
const TERMINAL_CELL_SIZE: CellSize = 4;

type App = Controller<TerminalSurface<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = Config {
        cell_size: TERMINAL_CELL_SIZE,
        ..Config::default()
    };
    config
        .apply_env()
        .context("Failed to read configuration")?;

    // An optional first argument overrides the interval, in milliseconds
    if let Some(ms) = std::env::args().nth(1) {
        let ms: f64 = ms.parse().context("Interval must be a number of milliseconds")?;
        config.interval = Interval::from_millis_f64(ms);
    }

    let surface = TerminalSurface::acquire().context("Failed to acquire terminal")?;
    let mut app = Controller::new(surface, config.cell_size, config.interval)
        .context("Failed to create grid")?;

    let res = run(&mut app, &config);

    app.destroy().context("Failed to restore terminal")?;

    res
}

fn run(app: &mut App, config: &Config) -> anyhow::Result<()> {
    update_status(app)?;

    loop {
        let timeout = app.poll_timeout(Instant::now(), MAX_POLL);
        let event = if event::poll(timeout)? {
            Some(event::read()?)
        } else {
            None
        };

        if driver::pass(app, config, event, Instant::now())? == Flow::Exit {
            break;
        }

        update_status(app)?;
    }

    Ok(())
}

fn update_status(app: &mut App) -> anyhow::Result<()> {
    let state = if app.is_running() { "running" } else { "paused" };

    let status = format!(
        " {state} | {} ms | gen {} | alive {} | [space] start/pause [r] reset [+/-] speed [q] quit",
        app.interval().as_millis(),
        app.generation(),
        app.grid().live_count(),
    );

    let surface = app.surface_mut();
    surface.set_status(status);
    surface.render_status()?;

    Ok(())
}
