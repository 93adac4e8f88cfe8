use std::fmt;
use std::sync::Arc;

use crate::autodraw::{AutoDrawScheduler, AutoDrawState};
use crate::clock::{Clock, SystemClock};
use crate::errors::{DrawError, RestoreError, RigRuleError};
use crate::group::GroupMode;
use crate::history::{HistoryEntry, RevealQueue};
use crate::random::{IndexSource, Randomness, SystemIndexSource};
use crate::rig::{RigRule, RigRuleId, RigRuleStore};
use crate::snapshot::{EngineSnapshot, PersistedState};

/// Delay before a drawn entry shows up in the visible history.
pub const DEFAULT_REVEAL_DELAY_MS: i64 = 800;

/// Result of one scheduler poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Auto-draw is off
    Idle,
    /// Armed, next fire still ahead
    Waiting { remaining_ms: i64 },
    /// The scheduled draw ran (successfully or not) and the timer was re-armed
    Fired(Result<HistoryEntry, DrawError>),
    /// The pool cannot cover the next round; auto-draw switched itself off
    Disabled,
}

/// Draw engine: owns the pool, round counter, history, rig rules, group
/// mode and the auto-draw timer, and applies every mutation as a whole.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use luckydraw_engine::clock::ManualClock;
/// use luckydraw_engine::engine::DrawEngine;
/// use luckydraw_engine::random::SeededIndexSource;
///
/// let mut engine = DrawEngine::new(
///     Box::new(SeededIndexSource::new(7)),
///     Arc::new(ManualClock::new(0)),
/// );
/// engine.apply_names(vec!["A".into(), "B".into(), "C".into()]);
/// engine.add_rig_rule("A", 1).unwrap();
/// engine.set_rig_enabled(true);
///
/// let entry = engine.draw().unwrap();
/// assert_eq!(entry.names, vec!["A".to_string()]);
/// assert_eq!(engine.round_counter(), 1);
///
/// engine.undo();
/// assert_eq!(engine.pool().len(), 3);
/// ```
pub struct DrawEngine {
    /// Names as applied, duplicates kept
    original: Vec<String>,
    /// Names not yet drawn
    pool: Vec<String>,
    round_counter: u32,
    /// Most recent first; `history[0].round == round_counter` when non-empty
    history: Vec<HistoryEntry>,
    winner: Option<HistoryEntry>,
    reveals: RevealQueue,
    reveal_delay_ms: i64,
    group: GroupMode,
    rig_enabled: bool,
    rules: RigRuleStore,
    auto: AutoDrawScheduler,
    last_randomness: Option<Randomness>,
    sound_enabled: bool,
    source: Box<dyn IndexSource>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for DrawEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawEngine")
            .field("pool", &self.pool)
            .field("round_counter", &self.round_counter)
            .field("history", &self.history)
            .field("group", &self.group)
            .field("rig_enabled", &self.rig_enabled)
            .field("rules", &self.rules)
            .field("auto", &self.auto)
            .finish_non_exhaustive()
    }
}

impl Default for DrawEngine {
    fn default() -> Self {
        Self::new(Box::new(SystemIndexSource::new()), Arc::new(SystemClock))
    }
}

impl DrawEngine {
    pub fn new(source: Box<dyn IndexSource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            original: Vec::new(),
            pool: Vec::new(),
            round_counter: 0,
            history: Vec::new(),
            winner: None,
            reveals: RevealQueue::default(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            group: GroupMode::default(),
            rig_enabled: false,
            rules: RigRuleStore::new(),
            auto: AutoDrawScheduler::default(),
            last_randomness: None,
            sound_enabled: false,
            source,
            clock,
        }
    }

    /// Sets the reveal latency for subsequent draws; 0 reveals immediately.
    pub fn with_reveal_delay_ms(mut self, delay_ms: i64) -> Self {
        self.reveal_delay_ms = delay_ms.max(0);
        self
    }

    /// Rebuilds an engine from saved state. Nothing is applied unless the
    /// whole state is consistent: history rounds run contiguously from the
    /// round counter down to 1, remaining plus drawn names equal the
    /// original list as a multiset, and every used rig rule names a winner
    /// of its round.
    pub fn restore(
        state: PersistedState,
        source: Box<dyn IndexSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RestoreError> {
        let history = state.upgraded_history();
        check_rounds(state.round_counter, &history)?;
        check_names(&state.original_names, &state.remaining_names, &history)?;
        check_used_rules(&state.rig_rules, &history)?;

        let mut engine = Self::new(source, clock);
        engine.original = state.original_names;
        engine.pool = state.remaining_names;
        engine.round_counter = state.round_counter;
        engine.winner = history.first().cloned();
        engine.history = history;
        engine.group = GroupMode::new(
            state.group_draw_enabled,
            state.group_size_initial,
            state.decrease_group_size,
        );
        engine.rig_enabled = state.rig_enabled;
        engine.rules = RigRuleStore::from_rules(state.rig_rules);
        engine.sound_enabled = state.sound_enabled;
        let interval = match state.auto_draw_interval_sec {
            0 => crate::autodraw::DEFAULT_INTERVAL_SECS,
            n => n,
        };
        let now = engine.clock.now_ms();
        engine
            .auto
            .configure(state.auto_draw_enabled, interval, now);
        tracing::debug!(
            round = engine.round_counter,
            pool_remaining = engine.pool.len(),
            rules = engine.rules.len(),
            "engine restored"
        );
        Ok(engine)
    }

    /// Saved-state view of the engine. History is written in full,
    /// including entries whose reveal is still pending.
    pub fn to_persisted(&self) -> PersistedState {
        let auto = self.auto.state();
        PersistedState {
            original_names: self.original.clone(),
            remaining_names: self.pool.clone(),
            history: self.history.iter().cloned().map(Into::into).collect(),
            round_counter: self.round_counter,
            rig_rules: self.rules.rules().to_vec(),
            rig_enabled: self.rig_enabled,
            auto_draw_enabled: auto.enabled,
            auto_draw_interval_sec: auto.interval_secs,
            sound_enabled: self.sound_enabled,
            group_draw_enabled: self.group.enabled,
            group_size_initial: self.group.initial,
            group_size_current: Some(self.group_size_current()),
            decrease_group_size: self.group.decreasing,
        }
    }

    /// Re-seeds the pool from `names` and clears round, history, winner,
    /// pending reveals and rig consumption. Rules themselves survive.
    pub fn apply_names(&mut self, names: Vec<String>) {
        self.reset(names);
    }

    pub fn reset(&mut self, names: Vec<String>) {
        let cancelled = self.reveals.flush();
        self.original = names.clone();
        self.pool = names;
        self.history.clear();
        self.round_counter = 0;
        self.winner = None;
        self.auto.disable();
        self.rules.clear_used();
        tracing::info!(
            pool_remaining = self.pool.len(),
            cancelled_reveals = cancelled,
            "pool reset"
        );
    }

    /// Resets from the names last applied.
    pub fn reset_to_original(&mut self) {
        let names = self.original.clone();
        self.reset(names);
    }

    /// Runs one round. On any outcome, auto-draw is switched off when the
    /// pool can no longer cover the next round.
    pub fn draw(&mut self) -> Result<HistoryEntry, DrawError> {
        let result = self.draw_round();
        if let Err(e) = &result {
            tracing::info!(error = %e, pool_remaining = self.pool.len(), "draw refused");
        }
        self.enforce_auto_floor();
        result
    }

    fn draw_round(&mut self) -> Result<HistoryEntry, DrawError> {
        if self.pool.is_empty() {
            return Err(DrawError::EmptyPool);
        }
        let slots = self.group.slots(self.round_counter);
        if self.pool.len() < slots {
            return Err(DrawError::InsufficientPool {
                required: slots,
                available: self.pool.len(),
            });
        }
        let round = self.round_counter + 1;

        let mut selected: Vec<String> = Vec::with_capacity(slots);
        let mut consumed: Vec<RigRuleId> = Vec::new();
        if self.rig_enabled {
            for rule in self.rules.candidates_for(round) {
                if selected.len() >= slots {
                    break;
                }
                if !self.pool.contains(&rule.name) || selected.contains(&rule.name) {
                    continue;
                }
                selected.push(rule.name.clone());
                consumed.push(rule.id.clone());
            }
        }
        let rigged = selected.len();

        if selected.len() < slots {
            let remaining_slots = slots - selected.len();
            let mut candidates: Vec<&str> = self
                .pool
                .iter()
                .map(String::as_str)
                .filter(|n| !selected.iter().any(|s| s.as_str() == *n))
                .collect();
            if self.rig_enabled {
                let protected = self.rules.protected_names(round);
                if !protected.is_empty() {
                    let unprotected: Vec<&str> = candidates
                        .iter()
                        .copied()
                        .filter(|n| !protected.contains(n))
                        .collect();
                    if unprotected.len() >= remaining_slots {
                        candidates = unprotected;
                    } else {
                        tracing::debug!(
                            round,
                            remaining_slots,
                            unprotected = unprotected.len(),
                            "protection waived to complete the draw"
                        );
                    }
                }
            }
            while selected.len() < slots && !candidates.is_empty() {
                let (idx, kind) = self.source.pick(candidates.len());
                self.last_randomness = Some(kind);
                let pick = candidates[idx].to_string();
                candidates.retain(|n| *n != pick);
                selected.push(pick);
            }
        }

        let timestamp = self.clock.now_ms();
        let entry = HistoryEntry {
            round,
            names: selected,
            timestamp,
            group_size: slots,
        };
        for name in &entry.names {
            if let Some(pos) = self.pool.iter().position(|n| n == name) {
                self.pool.remove(pos);
            }
        }
        self.rules.mark_used(&consumed);
        self.history.insert(0, entry.clone());
        self.round_counter = round;
        if self.reveal_delay_ms > 0 {
            self.reveals.schedule(round, timestamp + self.reveal_delay_ms);
        }
        self.winner = Some(entry.clone());

        tracing::info!(
            round,
            slots,
            rigged,
            source = self.last_randomness.map(|r| r.as_str()).unwrap_or("none"),
            pool_remaining = self.pool.len(),
            "draw complete"
        );
        Ok(entry)
    }

    /// Unwinds the most recent round. Returns the removed entry, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        if self.history.is_empty() {
            return None;
        }
        let entry = self.history.remove(0);
        self.pool.extend(entry.names.iter().cloned());
        self.round_counter = self.round_counter.saturating_sub(1);
        let released = self.rules.release(entry.round, &entry.names);
        self.reveals.cancel(entry.round);
        self.winner = self.history.first().cloned();
        tracing::info!(
            round = entry.round,
            released_rules = released,
            pool_remaining = self.pool.len(),
            "draw undone"
        );
        Some(entry)
    }

    /// Polls the reveal queue and the auto-draw timer.
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        let revealed = self.reveals.apply_due(now);
        if revealed > 0 {
            tracing::debug!(revealed, "history entries revealed");
        }
        if !self.auto.is_enabled() {
            return TickOutcome::Idle;
        }
        if self.pool.len() < self.min_pool_for_next_round() {
            self.auto.disable();
            tracing::info!(pool_remaining = self.pool.len(), "auto-draw disabled: pool exhausted");
            return TickOutcome::Disabled;
        }
        if !self.auto.is_due(now) {
            return TickOutcome::Waiting {
                remaining_ms: self.auto.remaining_ms(now).unwrap_or(0),
            };
        }
        let result = self.draw();
        if self.auto.is_enabled() {
            let now = self.clock.now_ms();
            self.auto.rearm(now);
        }
        TickOutcome::Fired(result)
    }

    fn min_pool_for_next_round(&self) -> usize {
        self.group.slots(self.round_counter)
    }

    fn enforce_auto_floor(&mut self) {
        if self.auto.is_enabled() && self.pool.len() < self.min_pool_for_next_round() {
            self.auto.disable();
            tracing::info!(pool_remaining = self.pool.len(), "auto-draw disabled: pool exhausted");
        }
    }

    pub fn configure_group_mode(&mut self, enabled: bool, initial: usize, decreasing: bool) {
        self.group = GroupMode::new(enabled, initial, decreasing);
        tracing::debug!(
            enabled,
            initial = self.group.initial,
            decreasing,
            current = self.group_size_current(),
            "group mode configured"
        );
    }

    pub fn configure_auto_draw(&mut self, enabled: bool, interval_secs: u32) {
        let now = self.clock.now_ms();
        if self.auto.configure(enabled, interval_secs, now) {
            tracing::info!(
                enabled,
                interval_secs = self.auto.interval_secs(),
                "auto-draw toggled"
            );
        }
    }

    pub fn add_rig_rule(&mut self, name: &str, round: u32) -> Result<RigRuleId, RigRuleError> {
        self.rules.add(name, round)
    }

    pub fn set_rig_rule_enabled(&mut self, id: &RigRuleId, enabled: bool) -> bool {
        self.rules.set_enabled(id, enabled)
    }

    pub fn delete_rig_rule(&mut self, id: &RigRuleId) -> Option<RigRule> {
        self.rules.remove(id)
    }

    pub fn set_rig_enabled(&mut self, enabled: bool) {
        self.rig_enabled = enabled;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Applies every pending reveal now. Hosts call this on teardown.
    pub fn flush_reveals(&mut self) -> usize {
        let flushed = self.reveals.flush();
        if flushed > 0 {
            tracing::debug!(flushed, "pending reveals flushed");
        }
        flushed
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn original_names(&self) -> &[String] {
        &self.original
    }

    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    pub fn next_round(&self) -> u32 {
        self.round_counter + 1
    }

    /// Authoritative history, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History without entries still waiting for their reveal.
    pub fn visible_history(&self) -> Vec<HistoryEntry> {
        self.history
            .iter()
            .filter(|e| !self.reveals.is_pending(e.round))
            .cloned()
            .collect()
    }

    pub fn pending_reveals(&self) -> usize {
        self.reveals.len()
    }

    pub fn winner(&self) -> Option<&HistoryEntry> {
        self.winner.as_ref()
    }

    pub fn group_mode(&self) -> GroupMode {
        self.group
    }

    /// Derived from the group configuration and the round counter.
    pub fn group_size_current(&self) -> usize {
        self.group.current(self.round_counter)
    }

    pub fn rig_enabled(&self) -> bool {
        self.rig_enabled
    }

    pub fn rig_rules(&self) -> &RigRuleStore {
        &self.rules
    }

    /// Names offered by the rig editor: the pool, or the original list
    /// once the pool is empty.
    pub fn rig_name_choices(&self) -> &[String] {
        if self.pool.is_empty() {
            &self.original
        } else {
            &self.pool
        }
    }

    pub fn auto_draw(&self) -> AutoDrawState {
        self.auto.state()
    }

    /// Whole seconds until the next scheduled draw.
    pub fn auto_draw_countdown_secs(&self) -> Option<i64> {
        self.auto.remaining_secs(self.clock.now_ms())
    }

    pub fn last_randomness(&self) -> Option<Randomness> {
        self.last_randomness
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn current_state(&self) -> EngineSnapshot {
        EngineSnapshot {
            pool: self.pool.clone(),
            original_names: self.original.clone(),
            round_counter: self.round_counter,
            history: self.visible_history(),
            pending_reveals: self.reveals.len(),
            winner: self.winner.clone(),
            group_mode: self.group,
            group_size_current: self.group_size_current(),
            rig_enabled: self.rig_enabled,
            rig_rules: self.rules.rules().to_vec(),
            auto_draw: self.auto.state(),
            last_randomness: self.last_randomness,
            sound_enabled: self.sound_enabled,
        }
    }
}

/// History is newest first and must count down from the round counter to 1.
fn check_rounds(round_counter: u32, history: &[HistoryEntry]) -> Result<(), RestoreError> {
    let latest = history.first().map_or(0, |entry| entry.round);
    if latest != round_counter {
        return Err(RestoreError::RoundMismatch {
            round_counter,
            latest,
        });
    }
    if history.len() != round_counter as usize {
        return Err(RestoreError::HistoryLength {
            round_counter,
            entries: history.len(),
        });
    }
    for (expected, entry) in (1..=round_counter).rev().zip(history) {
        if entry.round != expected {
            return Err(RestoreError::HistoryGap {
                expected,
                found: entry.round,
            });
        }
    }
    Ok(())
}

fn claim(unclaimed: &mut Vec<String>, name: &str) -> bool {
    match unclaimed.iter().position(|n| n == name) {
        Some(idx) => {
            unclaimed.swap_remove(idx);
            true
        }
        None => false,
    }
}

/// Remaining and drawn names together must use up the original list exactly.
fn check_names(
    original: &[String],
    remaining: &[String],
    history: &[HistoryEntry],
) -> Result<(), RestoreError> {
    let mut unclaimed = original.to_vec();
    for name in remaining {
        if !claim(&mut unclaimed, name) {
            return Err(RestoreError::UnknownRemaining(name.clone()));
        }
    }
    for entry in history {
        for name in &entry.names {
            if !claim(&mut unclaimed, name) {
                return Err(RestoreError::UnknownDrawn {
                    round: entry.round,
                    name: name.clone(),
                });
            }
        }
    }
    if !unclaimed.is_empty() {
        return Err(RestoreError::UnaccountedNames(unclaimed.len()));
    }
    Ok(())
}

fn check_used_rules(rules: &[RigRule], history: &[HistoryEntry]) -> Result<(), RestoreError> {
    for rule in rules.iter().filter(|r| r.used) {
        let drawn = history
            .iter()
            .any(|e| e.round == rule.round && e.names.contains(&rule.name));
        if !drawn {
            return Err(RestoreError::OrphanUsedRule {
                id: rule.id.to_string(),
                round: rule.round,
                name: rule.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::random::SeededIndexSource;

    fn engine(names: &[&str]) -> DrawEngine {
        let mut e = DrawEngine::new(
            Box::new(SeededIndexSource::new(3)),
            Arc::new(ManualClock::new(0)),
        );
        e.apply_names(names.iter().map(|s| s.to_string()).collect());
        e
    }

    #[test]
    fn draw_on_empty_pool_is_refused_without_change() {
        let mut e = engine(&[]);
        assert_eq!(e.draw(), Err(DrawError::EmptyPool));
        assert_eq!(e.round_counter(), 0);
        assert!(e.history().is_empty());
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut e = engine(&["A"]);
        assert!(e.undo().is_none());
        assert_eq!(e.pool(), ["A".to_string()]);
    }

    #[test]
    fn winner_follows_history_head() {
        let mut e = engine(&["A", "B", "C"]);
        let first = e.draw().unwrap();
        let second = e.draw().unwrap();
        assert_eq!(e.winner(), Some(&second));
        e.undo();
        assert_eq!(e.winner(), Some(&first));
        e.reset_to_original();
        assert!(e.winner().is_none());
    }

    #[test]
    fn duplicate_names_are_drawn_one_occurrence_at_a_time() {
        let mut e = engine(&["A", "A", "B"]);
        e.configure_group_mode(true, 2, false);
        let entry = e.draw().unwrap();
        let mut names = entry.names.clone();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), entry.names.len(), "no name twice in a round");
        assert_eq!(e.pool().len(), 3 - entry.names.len());
    }
}
