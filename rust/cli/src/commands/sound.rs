use std::io::Write;

use crate::cli::Toggle;
use crate::config::Config;
use crate::error::CliError;
use crate::store;

/// Stores the sound preference. The CLI itself plays nothing; the flag is
/// kept for other front ends sharing the state file.
pub fn handle_sound_command(
    config: &Config,
    state: Toggle,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (store, mut engine) = store::open_engine(config, err)?;
    engine.set_sound_enabled(state.is_on());
    store::persist(&store, &mut engine)?;
    writeln!(out, "Sound {}", state.as_str())?;
    Ok(())
}
