//! Operator overrides that force a name to win a given round.
//!
//! The raw collection is kept in insertion order, newest first, which is
//! also the order the draw engine consumes rules that share a round. A
//! round-sorted view is derived on demand for display.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::RigRuleError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RigRuleId(String);

impl RigRuleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RigRuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RigRuleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RigRuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A forced win of `name` at `round`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigRule {
    pub id: RigRuleId,
    pub name: String,
    /// Target round (1-based)
    pub round: u32,
    pub enabled: bool,
    /// Set by the draw that consumed this rule, cleared by the matching undo
    pub used: bool,
}

impl RigRule {
    /// Eligible for the rig pass of `round`.
    fn applies_to(&self, round: u32) -> bool {
        self.enabled && !self.used && self.round == round
    }

    /// Reserves its name against random picks in rounds before its own.
    fn protects_before(&self, round: u32) -> bool {
        self.enabled && !self.used && self.round > round
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RigRuleStore {
    rules: Vec<RigRule>,
}

impl RigRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from rules in raw storage order.
    pub fn from_rules(rules: Vec<RigRule>) -> Self {
        Self { rules }
    }

    /// Adds an enabled, unused rule in front of the existing ones.
    pub fn add(&mut self, name: &str, round: u32) -> Result<RigRuleId, RigRuleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RigRuleError::EmptyName);
        }
        if round == 0 {
            return Err(RigRuleError::InvalidRound(round));
        }
        let id = RigRuleId::new();
        self.rules.insert(
            0,
            RigRule {
                id: id.clone(),
                name: name.to_string(),
                round,
                enabled: true,
                used: false,
            },
        );
        Ok(id)
    }

    /// Returns false when no rule has this id.
    pub fn set_enabled(&mut self, id: &RigRuleId, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| &r.id == id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RigRuleId) -> Option<RigRule> {
        let pos = self.rules.iter().position(|r| &r.id == id)?;
        Some(self.rules.remove(pos))
    }

    pub fn get(&self, id: &RigRuleId) -> Option<&RigRule> {
        self.rules.iter().find(|r| &r.id == id)
    }

    /// Rules ordered by ascending round; ties keep storage order.
    pub fn list(&self) -> Vec<RigRule> {
        let mut sorted = self.rules.clone();
        sorted.sort_by_key(|r| r.round);
        sorted
    }

    /// Raw storage order, newest first.
    pub fn rules(&self) -> &[RigRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules eligible for `round`, in storage order.
    pub(crate) fn candidates_for(&self, round: u32) -> impl Iterator<Item = &RigRule> {
        self.rules.iter().filter(move |r| r.applies_to(round))
    }

    /// Names reserved by enabled, unconsumed rules targeting a round after `round`.
    pub(crate) fn protected_names(&self, round: u32) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.protects_before(round))
            .map(|r| r.name.as_str())
            .collect()
    }

    pub(crate) fn mark_used(&mut self, ids: &[RigRuleId]) {
        for rule in self.rules.iter_mut().filter(|r| ids.contains(&r.id)) {
            rule.used = true;
        }
    }

    /// Releases rules consumed by the draw of `round` that picked any of `names`.
    pub(crate) fn release(&mut self, round: u32, names: &[String]) -> usize {
        let mut released = 0;
        for rule in self
            .rules
            .iter_mut()
            .filter(|r| r.used && r.round == round && names.contains(&r.name))
        {
            rule.used = false;
            released += 1;
        }
        released
    }

    pub(crate) fn clear_used(&mut self) {
        for rule in &mut self.rules {
            rule.used = false;
        }
    }
}
