use serde::{Deserialize, Serialize};

use crate::autodraw::{AutoDrawState, DEFAULT_INTERVAL_SECS};
use crate::group::GroupMode;
use crate::history::{HistoryEntry, StoredHistoryEntry};
use crate::random::Randomness;
use crate::rig::RigRule;

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    /// Names still eligible, in pool order
    pub pool: Vec<String>,
    pub original_names: Vec<String>,
    pub round_counter: u32,
    /// Visible history, most recent first (pending reveals omitted)
    pub history: Vec<HistoryEntry>,
    /// Entries drawn but not yet revealed
    pub pending_reveals: usize,
    pub winner: Option<HistoryEntry>,
    pub group_mode: GroupMode,
    pub group_size_current: usize,
    pub rig_enabled: bool,
    /// Rules in storage order, newest first
    pub rig_rules: Vec<RigRule>,
    pub auto_draw: AutoDrawState,
    pub last_randomness: Option<Randomness>,
    pub sound_enabled: bool,
}

/// Saved-state shape shared with the storage collaborator.
///
/// Key names match the browser storage layout so old saves load unchanged.
/// History items in the legacy single-winner shape are upgraded when the
/// state is restored into an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub original_names: Vec<String>,
    #[serde(default)]
    pub remaining_names: Vec<String>,
    #[serde(default)]
    pub history: Vec<StoredHistoryEntry>,
    #[serde(default)]
    pub round_counter: u32,
    #[serde(default)]
    pub rig_rules: Vec<RigRule>,
    #[serde(default)]
    pub rig_enabled: bool,
    #[serde(default)]
    pub auto_draw_enabled: bool,
    #[serde(default = "default_interval")]
    pub auto_draw_interval_sec: u32,
    #[serde(default)]
    pub sound_enabled: bool,
    #[serde(default)]
    pub group_draw_enabled: bool,
    #[serde(default = "default_group_size")]
    pub group_size_initial: usize,
    /// Written for older readers; always recomputed on restore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_size_current: Option<usize>,
    #[serde(default)]
    pub decrease_group_size: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            original_names: Vec::new(),
            remaining_names: Vec::new(),
            history: Vec::new(),
            round_counter: 0,
            rig_rules: Vec::new(),
            rig_enabled: false,
            auto_draw_enabled: false,
            auto_draw_interval_sec: DEFAULT_INTERVAL_SECS,
            sound_enabled: false,
            group_draw_enabled: false,
            group_size_initial: 1,
            group_size_current: None,
            decrease_group_size: false,
        }
    }
}

impl PersistedState {
    /// History upgraded to the multi-winner shape, most recent first.
    pub fn upgraded_history(&self) -> Vec<HistoryEntry> {
        self.history.iter().cloned().map(HistoryEntry::from).collect()
    }
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_SECS
}

fn default_group_size() -> usize {
    1
}
