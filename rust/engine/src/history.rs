use serde::{Deserialize, Serialize};

/// One completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Round number (1-based)
    pub round: u32,
    /// Winners in selection order: rigged picks first, then random picks
    pub names: Vec<String>,
    /// Epoch milliseconds when the draw happened
    pub timestamp: i64,
    /// Slots the round asked for
    pub group_size: usize,
}

/// History item as found in saved state: either the multi-winner shape or
/// the single-winner shape written by older versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredHistoryEntry {
    Current {
        round: u32,
        names: Vec<String>,
        timestamp: i64,
        #[serde(default, rename = "groupSize", skip_serializing_if = "Option::is_none")]
        group_size: Option<usize>,
    },
    Legacy {
        round: u32,
        name: String,
        timestamp: i64,
    },
}

impl From<StoredHistoryEntry> for HistoryEntry {
    fn from(stored: StoredHistoryEntry) -> Self {
        match stored {
            StoredHistoryEntry::Current {
                round,
                names,
                timestamp,
                group_size,
            } => {
                let group_size = group_size.unwrap_or(names.len()).max(1);
                HistoryEntry {
                    round,
                    names,
                    timestamp,
                    group_size,
                }
            }
            StoredHistoryEntry::Legacy {
                round,
                name,
                timestamp,
            } => HistoryEntry {
                round,
                names: vec![name],
                timestamp,
                group_size: 1,
            },
        }
    }
}

impl From<HistoryEntry> for StoredHistoryEntry {
    fn from(entry: HistoryEntry) -> Self {
        StoredHistoryEntry::Current {
            round: entry.round,
            names: entry.names,
            timestamp: entry.timestamp,
            group_size: Some(entry.group_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingReveal {
    round: u32,
    visible_at: i64,
}

/// History entries whose appearance is held back for the reveal animation.
///
/// The pool and round counter change immediately on a draw; only the
/// entry's visibility in the history list waits. Pending reveals are
/// owned here so a reset can cancel them all at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealQueue {
    pending: Vec<PendingReveal>,
}

impl RevealQueue {
    pub fn schedule(&mut self, round: u32, visible_at: i64) {
        self.pending.push(PendingReveal { round, visible_at });
    }

    pub fn is_pending(&self, round: u32) -> bool {
        self.pending.iter().any(|p| p.round == round)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops reveals that are due at `now_ms`; returns how many.
    pub fn apply_due(&mut self, now_ms: i64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.visible_at > now_ms);
        before - self.pending.len()
    }

    pub fn cancel(&mut self, round: u32) {
        self.pending.retain(|p| p.round != round);
    }

    /// Makes everything visible now; returns how many were still pending.
    pub fn flush(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_queue_applies_only_due_entries() {
        let mut q = RevealQueue::default();
        q.schedule(1, 800);
        q.schedule(2, 1_600);
        assert_eq!(q.apply_due(799), 0);
        assert_eq!(q.apply_due(800), 1);
        assert!(!q.is_pending(1));
        assert!(q.is_pending(2));
        assert_eq!(q.flush(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn stored_entry_without_group_size_uses_name_count() {
        let stored = StoredHistoryEntry::Current {
            round: 2,
            names: vec!["A".into(), "B".into()],
            timestamp: 5,
            group_size: None,
        };
        let entry = HistoryEntry::from(stored);
        assert_eq!(entry.group_size, 2);
    }
}
