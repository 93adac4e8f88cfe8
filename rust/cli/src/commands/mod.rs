//! Command handlers for the `luckydraw` CLI.
//!
//! Each subcommand lives in its own module with the same shape:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so tests capture them
//! - Stateful commands take the resolved [`Config`](crate::config::Config),
//!   open the engine from the state file, and save it back afterwards

mod apply;
mod auto;
mod cfg;
mod clear;
mod draw;
mod group;
mod reset;
mod rig;
mod rng;
mod sound;
mod status;
mod undo;

pub use apply::handle_apply_command;
pub use auto::handle_auto_command;
pub use cfg::handle_cfg_command;
pub use clear::handle_clear_command;
pub use draw::handle_draw_command;
pub use group::{GroupArgs, handle_group_command};
pub use reset::handle_reset_command;
pub use rig::handle_rig_command;
pub use rng::handle_rng_command;
pub use sound::handle_sound_command;
pub use status::handle_status_command;
pub use undo::handle_undo_command;
