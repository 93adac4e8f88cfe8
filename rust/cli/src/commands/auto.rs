use std::io::Write;
use std::time::Duration;

use luckydraw_engine::engine::DrawEngine;
use luckydraw_engine::session::{AutoDrawDriver, AutoDrawEvent, DrawSession};

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_entry;
use crate::store::{self, StateStore};
use crate::ui;

/// Arms auto-draw and drives it in the foreground until the pool can no
/// longer cover a round or `max_rounds` draws have happened. Every drawn
/// round is saved as it happens, so an interrupted run keeps its rounds.
/// Auto-draw is left disabled in the saved state either way.
pub fn handle_auto_command(
    config: &Config,
    interval: Option<u32>,
    max_rounds: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let interval = interval.unwrap_or(config.auto_interval_secs);
    if interval == 0 {
        return Err(CliError::InvalidInput("interval must be at least 1 second".into()));
    }
    let (store, engine) = store::open_engine(config, err)?;
    let session = DrawSession::new(engine);
    session.configure_auto_draw(true, interval);
    writeln!(out, "Auto-draw every {}s", interval)?;
    out.flush()?;

    let (mut handle, events) =
        AutoDrawDriver::spawn(session.clone(), Duration::from_millis(config.poll_interval_ms));
    let mut drawn = 0u32;
    let mut lost_driver = false;
    loop {
        let Ok(event) = events.recv() else {
            lost_driver = true;
            break;
        };
        if !handle_event(&session, &store, event, &mut drawn, max_rounds, out, err)? {
            break;
        }
    }
    handle.stop();
    drop(handle);

    session.with_engine(|engine| store::persist(&store, engine))?;
    writeln!(out, "Auto-draw stopped after {} rounds", drawn)?;
    if lost_driver {
        return Err(CliError::Interrupted(format!(
            "auto-draw driver exited after {} rounds",
            drawn
        )));
    }
    Ok(())
}

/// Applies one driver event. Returns whether the run should keep going.
fn handle_event(
    session: &DrawSession,
    store: &StateStore,
    event: AutoDrawEvent,
    drawn: &mut u32,
    max_rounds: Option<u32>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<bool, CliError> {
    match event {
        AutoDrawEvent::Drawn(entry) => {
            *drawn += 1;
            session.with_engine(|engine| checkpoint(store, engine))?;
            writeln!(out, "{}", format_entry(&entry))?;
            out.flush()?;
            Ok(!max_rounds.is_some_and(|max| *drawn >= max))
        }
        AutoDrawEvent::Refused(e) => {
            ui::display_warning(err, &e.to_string())?;
            Ok(true)
        }
        AutoDrawEvent::Disarmed => Ok(false),
    }
}

/// Saves a drawn round mid-run. The timer only lives in this process, so the
/// file never claims auto-draw is armed.
fn checkpoint(store: &StateStore, engine: &mut DrawEngine) -> Result<(), CliError> {
    engine.flush_reveals();
    let mut state = engine.to_persisted();
    state.auto_draw_enabled = false;
    store.save(&state)
}
