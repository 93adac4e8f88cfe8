//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "luckydraw",
    version,
    about = "Lucky Draw CLI",
    long_about = "Draw names from a pool round by round, with group draws, \
                  rig rules, undo and a timed auto-draw mode."
)]
pub struct LuckyDrawCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace the pool with a new list of names and start over
    Apply {
        /// Text file with one name per line; `-` reads stdin
        #[arg(long, conflicts_with = "names", required_unless_present = "names")]
        file: Option<String>,
        /// Comma or newline separated names
        #[arg(long)]
        names: Option<String>,
    },
    /// Run one round
    Draw,
    /// Unwind the most recent round
    Undo,
    /// Restart from the names last applied
    Reset,
    /// Show pool, history and settings
    Status {
        /// Print the full engine state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage rig rules
    Rig {
        #[command(subcommand)]
        cmd: RigCommand,
    },
    /// Configure group draws
    Group {
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        #[arg(long)]
        disable: bool,
        /// Names drawn in the first round
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        size: Option<u32>,
        /// Shrink the group by one each round, down to one
        #[arg(long, conflicts_with = "steady")]
        decreasing: bool,
        /// Keep the group size constant
        #[arg(long)]
        steady: bool,
    },
    /// Draw automatically on a timer until the pool runs out
    Auto {
        /// Seconds between draws (defaults to the configured interval)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        interval: Option<u32>,
        /// Stop after this many rounds
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_rounds: Option<u32>,
    },
    /// Store the sound preference
    Sound {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Delete the saved state file
    Clear,
    /// Show resolved configuration and where each value came from
    Cfg,
    /// Print a sample of pool indices from the random source
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RigCommand {
    /// Reserve a name for a round
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        round: u32,
    },
    /// Re-enable a rule
    Enable { id: String },
    /// Disable a rule without deleting it
    Disable { id: String },
    /// Delete a rule
    Rm { id: String },
    /// List rules by target round
    List,
    /// Turn rigging on
    On,
    /// Turn rigging off
    Off,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }

    /// # Examples
    ///
    /// ```
    /// # use luckydraw_cli::cli::Toggle;
    /// assert_eq!(Toggle::Off.as_str(), "off");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::On => "on",
            Toggle::Off => "off",
        }
    }
}
