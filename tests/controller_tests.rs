use std::time::Duration;
use std::time::Instant;

use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use canvas_life::CellSize;
use canvas_life::Error;
use canvas_life::config::Config;
use canvas_life::controller::Controller;
use canvas_life::controller::RunState;
use canvas_life::driver::Flow;
use canvas_life::driver::pass;
use canvas_life::grid::CellPos;
use canvas_life::grid::Grid;
use canvas_life::grid::GridError;
use canvas_life::grid::Viewport;
use canvas_life::render::Render;
use canvas_life::render::RenderError;
use canvas_life::timer::Interval;

/// Keeps a copy of every grid it is asked to draw
struct Recorder {
    viewport: Viewport,
    frames: Vec<Grid>,
    detached: usize,
}

impl Recorder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            frames: Vec::new(),
            detached: 0,
        }
    }

    fn last(&self) -> &Grid {
        self.frames.last().expect("nothing was rendered")
    }
}

impl Render for Recorder {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn render(&mut self, grid: &Grid, _cell_size: CellSize) -> Result<(), RenderError> {
        self.frames.push(grid.clone());
        Ok(())
    }

    fn detach(&mut self) -> Result<(), RenderError> {
        self.detached += 1;
        Ok(())
    }
}

const MS: Duration = Duration::from_millis(1);

fn blinker(c: &mut Controller<Recorder>) -> anyhow::Result<()> {
    // cells (2, 1), (2, 2) and (2, 3) with 10px cells
    for x in [15, 25, 35] {
        assert!(c.click(x, 25)?);
    }

    Ok(())
}

fn key(c: char) -> CrossTermEvent {
    CrossTermEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrossTermEvent {
    CrossTermEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn controller() -> Controller<Recorder> {
    // 7x7 grid
    Controller::new(Recorder::new(60, 60), 10, Interval::from_millis(100)).unwrap()
}

#[test]
fn surface_must_be_usable() {
    let res = Controller::new(Recorder::new(60, 60), 0, Interval::MIN);

    assert!(matches!(res, Err(Error::Grid(GridError::ZeroCellSize))));
}

#[test]
fn every_change_is_rendered() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    assert_eq!(c.surface().frames.len(), 1);

    blinker(&mut c)?;
    assert_eq!(c.surface().frames.len(), 4);
    assert_eq!(c.surface().last(), c.grid());

    c.start(t0);
    assert!(c.tick(t0 + 100 * MS)?);
    assert_eq!(c.surface().frames.len(), 5);
    assert_eq!(c.surface().last(), c.grid());

    c.reset()?;
    assert_eq!(c.surface().frames.len(), 6);

    Ok(())
}

#[test]
fn blinker_through_controller() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    blinker(&mut c)?;
    let horizontal = c.grid().clone();

    c.start(t0);
    c.tick(t0 + 100 * MS)?;

    let vertical: Vec<CellPos> = c.grid().iter().filter(|(_, a)| *a).map(|(p, _)| p).collect();
    assert_eq!(
        vertical,
        vec![CellPos::new(1, 2), CellPos::new(2, 2), CellPos::new(3, 2)]
    );

    c.tick(t0 + 200 * MS)?;
    assert_eq!(c.grid(), &horizontal);
    assert_eq!(c.generation(), 2);

    Ok(())
}

#[test]
fn start_and_stop_are_idempotent() {
    let t0 = Instant::now();
    let mut c = controller();

    c.stop();
    assert_eq!(c.state(), RunState::Stopped);

    c.start(t0);
    let deadline = c.next_deadline();

    // a second start must not push the deadline back
    c.start(t0 + 50 * MS);
    assert_eq!(c.next_deadline(), deadline);
    assert_eq!(c.state(), RunState::Running);

    c.stop();
    c.stop();
    assert_eq!(c.state(), RunState::Stopped);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn stopped_controller_never_steps() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    blinker(&mut c)?;

    c.start(t0);
    c.stop();

    assert!(!c.tick(t0 + 10_000 * MS)?);
    assert_eq!(c.generation(), 0);

    Ok(())
}

#[test]
fn toggle_running() {
    let t0 = Instant::now();
    let mut c = controller();

    c.toggle_running(t0);
    assert!(c.is_running());

    c.toggle_running(t0);
    assert!(!c.is_running());
}

#[test]
fn speed_change_restarts_timer() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    blinker(&mut c)?;
    let before = c.grid().clone();

    c.start(t0);
    c.set_speed(Interval::from_millis(500), t0 + 90 * MS);

    assert_eq!(c.interval().as_millis(), 500);
    assert!(c.is_running());
    assert_eq!(c.grid(), &before);

    // the old deadline no longer applies
    assert!(!c.tick(t0 + 100 * MS)?);
    assert!(!c.tick(t0 + 589 * MS)?);
    assert!(c.tick(t0 + 590 * MS)?);

    Ok(())
}

#[test]
fn speed_change_while_stopped_stays_stopped() {
    let t0 = Instant::now();
    let mut c = controller();

    c.set_speed_millis(250.4, t0);

    assert_eq!(c.interval().as_millis(), 251);
    assert!(!c.is_running());
}

#[test]
fn speed_is_clamped() {
    let t0 = Instant::now();
    let mut c = controller();

    c.set_speed_millis(1.0, t0);
    assert_eq!(c.interval(), Interval::MIN);

    c.set_speed_millis(0.0, t0);
    assert_eq!(c.interval().as_millis(), 10);
}

#[test]
fn reset_keeps_dimensions_and_run_state() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    blinker(&mut c)?;
    c.start(t0);
    c.tick(t0 + 100 * MS)?;

    c.reset()?;

    assert_eq!(c.grid(), &Grid::new(7, 7)?);
    assert_eq!(c.generation(), 0);
    assert!(c.is_running());

    c.stop();
    c.click(5, 5)?;
    c.reset()?;

    assert_eq!(c.grid(), &Grid::new(7, 7)?);
    assert!(!c.is_running());

    Ok(())
}

#[test]
fn edge_clicks_land_on_cells() -> anyhow::Result<()> {
    let mut c = controller();

    // the bottom right pixel of the viewport
    assert!(c.click(60, 60)?);
    assert!(c.grid().is_alive(CellPos::new(6, 6)));

    Ok(())
}

#[test]
fn clicks_outside_are_ignored() -> anyhow::Result<()> {
    let mut c = controller();

    assert!(!c.click(500, 5)?);
    assert_eq!(c.grid().live_count(), 0);
    assert_eq!(c.surface().frames.len(), 1);

    Ok(())
}

#[test]
fn destroy_cancels_and_detaches_once() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut c = controller();
    c.start(t0);

    c.destroy()?;
    c.destroy()?;

    assert!(c.is_destroyed());
    assert_eq!(c.surface().detached, 1);
    assert!(!c.tick(t0 + 10_000 * MS)?);
    assert!(!c.click(5, 5)?);

    // cannot be restarted
    c.start(t0);
    assert!(!c.is_running());

    Ok(())
}

#[test]
fn drop_detaches() {
    let mut recorder = Recorder::new(20, 20);

    {
        let mut c = Controller::new(&mut recorder, 10, Interval::MIN).unwrap();
        c.start(Instant::now());
    }

    assert_eq!(recorder.detached, 1);
}

#[test]
fn dump_is_text_grid() -> anyhow::Result<()> {
    let mut c = Controller::new(Recorder::new(20, 10), 10, Interval::MIN)?;
    c.click(15, 5)?;

    insta::assert_snapshot!(c.dump(), @r"
    .#.
    ...
    ");

    Ok(())
}

#[test]
fn ignored_input_does_not_hold_back_steps() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let config = Config::default();
    let mut c = controller();
    blinker(&mut c)?;

    assert_eq!(pass(&mut c, &config, Some(key(' ')), t0)?, Flow::Continue);
    assert!(c.is_running());

    // pointer moves, right clicks and resizes map to nothing
    let noise = [
        mouse(MouseEventKind::Moved, 3, 3),
        mouse(MouseEventKind::Down(MouseButton::Right), 3, 3),
        CrossTermEvent::Resize(80, 24),
    ];
    for (i, event) in noise.into_iter().enumerate() {
        let now = t0 + (i as u32 + 1) * 100 * MS;
        assert_eq!(pass(&mut c, &config, Some(event), now)?, Flow::Continue);
    }

    assert_eq!(c.generation(), 3);

    Ok(())
}

#[test]
fn pass_steps_without_input() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let config = Config::default();
    let mut c = controller();
    c.start(t0);

    pass(&mut c, &config, None, t0 + 50 * MS)?;
    assert_eq!(c.generation(), 0);

    pass(&mut c, &config, None, t0 + 100 * MS)?;
    assert_eq!(c.generation(), 1);

    Ok(())
}

#[test]
fn pass_routes_input() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let config = Config::default();
    let mut c = controller();

    pass(&mut c, &config, Some(mouse(MouseEventKind::Down(MouseButton::Left), 15, 25)), t0)?;
    assert!(c.grid().is_alive(CellPos::new(2, 1)));

    pass(&mut c, &config, Some(key('-')), t0)?;
    assert_eq!(c.interval().as_millis(), 200);

    pass(&mut c, &config, Some(key('r')), t0)?;
    assert_eq!(c.grid().live_count(), 0);

    c.start(t0);
    assert_eq!(pass(&mut c, &config, Some(key('q')), t0 + 10_000 * MS)?, Flow::Exit);
    assert_eq!(c.generation(), 0);

    Ok(())
}
