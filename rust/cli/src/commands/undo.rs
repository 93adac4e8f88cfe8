use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_entry;
use crate::store;

pub fn handle_undo_command(
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (store, mut engine) = store::open_engine(config, err)?;
    match engine.undo() {
        Some(entry) => {
            store::persist(&store, &mut engine)?;
            writeln!(out, "Undid {}", format_entry(&entry))?;
            writeln!(out, "Pool: {} remaining", engine.pool().len())?;
        }
        None => writeln!(out, "Nothing to undo")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, temp_config};
    use crate::commands::{handle_apply_command, handle_draw_command};

    #[test]
    fn undo_returns_names_to_pool() {
        let (_dir, config) = temp_config();
        let mut sink = Vec::new();
        let mut err = Vec::new();
        handle_apply_command(&config, None, Some("A,B,C".into()), &mut sink, &mut err).unwrap();
        handle_draw_command(&config, &mut sink, &mut err).unwrap();

        let mut out = Vec::new();
        handle_undo_command(&config, &mut out, &mut err).unwrap();
        let text = output(out);
        assert!(text.starts_with("Undid Round 1: "));
        assert!(text.ends_with("Pool: 3 remaining\n"));

        let mut out = Vec::new();
        handle_undo_command(&config, &mut out, &mut err).unwrap();
        assert_eq!(output(out), "Nothing to undo\n");
    }
}
