//! # Lucky Draw CLI Library
//!
//! Command-line host for [`luckydraw_engine`]. Each invocation loads the
//! engine from a JSON state file, runs one operation and saves it back.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand handler.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["luckydraw", "apply", "--names", "Ada,Miles,Jo"];
//! let code = luckydraw_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `apply`: Load a new list of names
//! - `draw`: Run one round
//! - `undo`: Unwind the most recent round
//! - `reset`: Start over with the same names
//! - `status`: Show pool, history and settings
//! - `rig`: Manage rig rules
//! - `group`: Configure group draws
//! - `auto`: Draw on a timer in the foreground
//! - `sound`: Store the sound preference
//! - `clear`: Delete the saved state
//! - `cfg`: Display configuration and value sources
//! - `rng`: Sample the random source

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
mod config;
mod error;
mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{Commands, LuckyDrawCli};
use commands::{
    GroupArgs, handle_apply_command, handle_auto_command, handle_cfg_command,
    handle_clear_command, handle_draw_command, handle_group_command, handle_reset_command,
    handle_rig_command, handle_rng_command, handle_sound_command, handle_status_command,
    handle_undo_command,
};

pub use config::{Config, ConfigError, ValueSource};
pub use error::CliError;

const COMMANDS: &[&str] = &[
    "apply", "draw", "undo", "reset", "status", "rig", "group", "auto", "sound", "clear", "cfg",
    "rng",
];

/// Main entry point for the CLI application.
///
/// Returns the process exit code: `0` on success, `2` on any error
/// (including refused draws), `130` when a foreground auto-draw run is cut
/// short.
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["luckydraw", "rng", "--seed", "42"];
/// let code = luckydraw_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match LuckyDrawCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Lucky Draw CLI");
            write_or_exit!(err, "Usage: luckydraw <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in COMMANDS {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: luckydraw --help");
            return exit_code::ERROR;
        }
    };

    let result = dispatch(cli.cmd, out, err);
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    // cfg reports its own config errors; rng needs no state
    let config = match cmd {
        Commands::Cfg => return handle_cfg_command(out),
        Commands::Rng { seed } => return handle_rng_command(seed, out),
        _ => config::load()?,
    };
    tracing::debug!(state_path = %config.state_path, seeded = config.seed.is_some(), "config loaded");
    match cmd {
        Commands::Apply { file, names } => handle_apply_command(&config, file, names, out, err),
        Commands::Draw => handle_draw_command(&config, out, err),
        Commands::Undo => handle_undo_command(&config, out, err),
        Commands::Reset => handle_reset_command(&config, out, err),
        Commands::Status { json } => handle_status_command(&config, json, out, err),
        Commands::Rig { cmd } => handle_rig_command(&config, cmd, out, err),
        Commands::Group {
            enable,
            disable,
            size,
            decreasing,
            steady,
        } => handle_group_command(
            &config,
            GroupArgs {
                enable,
                disable,
                size,
                decreasing,
                steady,
            },
            out,
            err,
        ),
        Commands::Auto {
            interval,
            max_rounds,
        } => handle_auto_command(&config, interval, max_rounds, out, err),
        Commands::Sound { state } => handle_sound_command(&config, state, out, err),
        Commands::Clear => handle_clear_command(&config, out),
        Commands::Cfg | Commands::Rng { .. } => Ok(()),
    }
}
