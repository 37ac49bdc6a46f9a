use std::time::Instant;

use crossterm::event::Event as CrossTermEvent;
use tracing::info;

use crate::config::Config;
use crate::controller::Controller;
use crate::events::AppEvent;
use crate::events::Event;
use crate::events::SimEvent;
use crate::io::convert_event;
use crate::render::Render;
use crate::render::RenderError;

/// What the event loop does after a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One pass of the event loop: handle `event` if there is one, then step if the timer is due.
///
/// Input that maps to no life event is dropped. It never holds back the step.
pub fn pass<R: Render>(
    app: &mut Controller<R>,
    config: &Config,
    event: Option<CrossTermEvent>,
    now: Instant,
) -> Result<Flow, RenderError> {
    match event.and_then(convert_event) {
        Some(Event::AppEvent(AppEvent::Exit)) => return Ok(Flow::Exit),
        Some(Event::AppEvent(AppEvent::Dump)) => {
            info!("Grid at generation {}:\n{}", app.generation(), app.dump());
        }
        Some(Event::SimEvent(event)) => handle_sim_event(app, config, event, now)?,
        None => {}
    }

    app.tick(now)?;

    Ok(Flow::Continue)
}

fn handle_sim_event<R: Render>(
    app: &mut Controller<R>,
    config: &Config,
    event: SimEvent,
    now: Instant,
) -> Result<(), RenderError> {
    match event {
        SimEvent::Click { column, row } => {
            if let Some((x, y)) = app.surface().pointer_pixel(column, row) {
                app.click(x, y)?;
            }
        }
        SimEvent::ToggleRunning => app.toggle_running(now),
        SimEvent::Reset => app.reset()?,
        SimEvent::Faster => app.set_speed(config.faster(app.interval()), now),
        SimEvent::Slower => app.set_speed(config.slower(app.interval()), now),
    }

    Ok(())
}
