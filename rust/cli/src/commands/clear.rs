use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::store::StateStore;

pub fn handle_clear_command(config: &Config, out: &mut dyn Write) -> Result<(), CliError> {
    let store = StateStore::new(&config.state_path);
    if store.clear()? {
        writeln!(out, "Removed {}", store.path().display())?;
    } else {
        writeln!(out, "No saved state at {}", store.path().display())?;
    }
    Ok(())
}
