//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Any failed command, including refused draws.
pub const ERROR: i32 = 2;

/// A foreground auto-draw run cut short.
pub const INTERRUPTED: i32 = 130;
