use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils;
use crate::store;
use crate::ui;
use crate::validation::{duplicate_names, parse_name_list, parse_names};

/// Replaces the pool with names from `--file` or `--names` and starts a
/// new draw. Rig rules are kept but their consumption is cleared.
pub fn handle_apply_command(
    config: &Config,
    file: Option<String>,
    names: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let list = match (file, names) {
        (Some(path), _) => parse_names(
            &io_utils::read_text(&path).map_err(|e| CliError::Io(std::io::Error::other(e)))?,
        ),
        (None, Some(list)) => parse_name_list(&list),
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either --file or --names is required".into(),
            ));
        }
    };
    if list.is_empty() {
        return Err(CliError::InvalidInput("no names found".into()));
    }
    let dups = duplicate_names(&list);
    if !dups.is_empty() {
        ui::display_warning(
            err,
            &format!("Names listed more than once can win more than once: {}", dups.join(", ")),
        )?;
    }

    let (store, mut engine) = store::open_engine(config, err)?;
    engine.apply_names(list);
    store::persist(&store, &mut engine)?;
    writeln!(out, "Applied {} names", engine.pool().len())?;
    Ok(())
}
