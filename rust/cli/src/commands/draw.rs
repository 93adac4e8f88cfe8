use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_entry;
use crate::store;

/// Runs one round and prints its winners once the reveal delay has passed.
///
/// A refused draw (empty or too small pool) still saves state, since the
/// refusal may have switched auto-draw off.
pub fn handle_draw_command(
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (store, mut engine) = store::open_engine(config, err)?;
    let result = engine.draw();
    store::persist(&store, &mut engine)?;
    let entry = result?;

    if config.reveal_delay_ms > 0 {
        writeln!(out, "Drawing round {}...", entry.round)?;
        out.flush()?;
        thread::sleep(Duration::from_millis(u64::from(config.reveal_delay_ms)));
    }
    writeln!(out, "{}", format_entry(&entry))?;
    if engine.pool().is_empty() {
        writeln!(out, "All names have been drawn")?;
    }
    Ok(())
}
