use thiserror::Error;

/// Reasons a draw is refused. Neither variant mutates engine state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("No names left!")]
    EmptyPool,
    #[error("Not enough names left for this group size (need {required}, have {available})")]
    InsufficientPool { required: usize, available: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RigRuleError {
    #[error("Rig rule name must not be empty")]
    EmptyName,
    #[error("Invalid rig round: {0}, minimum: 1")]
    InvalidRound(u32),
}

/// Persisted state that cannot be applied as a whole.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("Remaining name {0:?} is not part of the original list")]
    UnknownRemaining(String),
    #[error("Round counter {round_counter} does not match latest history round {latest}")]
    RoundMismatch { round_counter: u32, latest: u32 },
    #[error("History is not a contiguous run of rounds: expected round {expected}, found {found}")]
    HistoryGap { expected: u32, found: u32 },
    #[error("Round counter {round_counter} does not match {entries} history entries")]
    HistoryLength { round_counter: u32, entries: usize },
    #[error("Round {round} winner {name:?} is not part of the original list")]
    UnknownDrawn { round: u32, name: String },
    #[error("{0} original names are neither remaining nor drawn")]
    UnaccountedNames(usize),
    #[error("Rig rule {id} is marked used but round {round} did not draw {name:?}")]
    OrphanUsedRule { id: String, round: u32, name: String },
}
