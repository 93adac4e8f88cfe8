use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_status;
use crate::store;

/// Prints the engine state. Read-only: the state file is not rewritten.
pub fn handle_status_command(
    config: &Config,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (_, mut engine) = store::open_engine(config, err)?;
    engine.flush_reveals();
    let state = engine.current_state();
    if json {
        let text = serde_json::to_string_pretty(&state).map_err(std::io::Error::other)?;
        writeln!(out, "{}", text)?;
    } else {
        writeln!(out, "{}", format_status(&state))?;
    }
    Ok(())
}
