use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::store;

/// Flags of the `group` subcommand. Anything left unset keeps its saved
/// value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupArgs {
    pub enable: bool,
    pub disable: bool,
    pub size: Option<u32>,
    pub decreasing: bool,
    pub steady: bool,
}

pub fn handle_group_command(
    config: &Config,
    args: GroupArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if args.enable && args.disable {
        return Err(CliError::InvalidInput(
            "--enable and --disable cannot be combined".into(),
        ));
    }
    if args.decreasing && args.steady {
        return Err(CliError::InvalidInput(
            "--decreasing and --steady cannot be combined".into(),
        ));
    }
    if args.size == Some(0) {
        return Err(CliError::InvalidInput("group size must be at least 1".into()));
    }

    let (store, mut engine) = store::open_engine(config, err)?;
    let current = engine.group_mode();
    let enabled = if args.enable {
        true
    } else if args.disable {
        false
    } else {
        current.enabled
    };
    let initial = args.size.map_or(current.initial, |s| s as usize);
    let decreasing = if args.decreasing {
        true
    } else if args.steady {
        false
    } else {
        current.decreasing
    };
    engine.configure_group_mode(enabled, initial, decreasing);
    store::persist(&store, &mut engine)?;

    let mode = engine.group_mode();
    if mode.enabled {
        writeln!(
            out,
            "Group draw on: start {}, {} (next round draws {})",
            mode.initial,
            if mode.decreasing { "decreasing" } else { "steady" },
            engine.group_size_current()
        )?;
    } else {
        writeln!(out, "Group draw off (start {})", mode.initial)?;
    }
    Ok(())
}
