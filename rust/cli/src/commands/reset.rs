use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::store;

/// Restarts from the names last applied. Rig rules survive with their
/// consumption cleared.
pub fn handle_reset_command(
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (store, mut engine) = store::open_engine(config, err)?;
    engine.reset_to_original();
    store::persist(&store, &mut engine)?;
    writeln!(out, "Reset: {} names in pool", engine.pool().len())?;
    Ok(())
}
