//! Plain-text rendering of draw results, rules and engine state.
//!
//! ## Example
//!
//! ```rust
//! use luckydraw_engine::history::HistoryEntry;
//! use luckydraw_cli::formatters::format_entry;
//!
//! let entry = HistoryEntry {
//!     round: 2,
//!     names: vec!["Ada".into(), "Jo".into()],
//!     timestamp: 0,
//!     group_size: 2,
//! };
//! assert_eq!(format_entry(&entry), "Round 2: Ada, Jo");
//! ```

use chrono::{DateTime, Utc};
use luckydraw_engine::history::HistoryEntry;
use luckydraw_engine::rig::RigRule;
use luckydraw_engine::snapshot::EngineSnapshot;

pub fn format_names(names: &[String]) -> String {
    names.join(", ")
}

pub fn format_entry(entry: &HistoryEntry) -> String {
    format!("Round {}: {}", entry.round, format_names(&entry.names))
}

/// Formats epoch milliseconds as a UTC wall-clock time.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_rule(rule: &RigRule) -> String {
    let mut flags = vec![if rule.enabled { "enabled" } else { "disabled" }];
    if rule.used {
        flags.push("used");
    }
    format!(
        "{}  round {:>3}  {}  ({})",
        rule.id,
        rule.round,
        rule.name,
        flags.join(", ")
    )
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

/// Multi-line summary used by `status`.
pub fn format_status(state: &EngineSnapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Round: {} (next round draws {})",
        state.round_counter,
        if state.group_mode.enabled {
            state.group_size_current
        } else {
            1
        }
    ));
    lines.push(format!(
        "Pool: {} of {} remaining",
        state.pool.len(),
        state.original_names.len()
    ));
    if !state.pool.is_empty() {
        lines.push(format!("  {}", format_names(&state.pool)));
    }
    let group = &state.group_mode;
    lines.push(format!(
        "Group draw: {} (start {}, {})",
        on_off(group.enabled),
        group.initial,
        if group.decreasing { "decreasing" } else { "steady" }
    ));
    let pending = state.rig_rules.iter().filter(|r| r.enabled && !r.used).count();
    lines.push(format!(
        "Rigging: {} ({} rules, {} pending)",
        on_off(state.rig_enabled),
        state.rig_rules.len(),
        pending
    ));
    lines.push(format!(
        "Auto-draw: {} (every {}s)",
        on_off(state.auto_draw.enabled),
        state.auto_draw.interval_secs
    ));
    lines.push(format!("Sound: {}", on_off(state.sound_enabled)));
    lines.push(format!(
        "Randomness: {}",
        state.last_randomness.map(|r| r.as_str()).unwrap_or("none")
    ));
    match &state.winner {
        Some(w) => lines.push(format!("Winner: {}", format_entry(w))),
        None => lines.push("Winner: -".to_string()),
    }
    if state.history.is_empty() {
        lines.push("History: empty".to_string());
    } else {
        lines.push("History:".to_string());
        for entry in &state.history {
            lines.push(format!(
                "  [{}] {}",
                format_timestamp(entry.timestamp),
                format_entry(entry)
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use luckydraw_engine::rig::RigRuleId;

    #[test]
    fn timestamp_renders_in_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(86_400_000 + 61_000), "1970-01-02 00:01:01");
    }

    #[test]
    fn rule_line_shows_flags() {
        let rule = RigRule {
            id: RigRuleId::from("r1"),
            name: "Ada".into(),
            round: 2,
            enabled: false,
            used: true,
        };
        let line = format_rule(&rule);
        assert!(line.starts_with("r1"));
        assert!(line.contains("round   2"));
        assert!(line.ends_with("(disabled, used)"));
    }

    #[test]
    fn single_name_entry() {
        let entry = HistoryEntry {
            round: 1,
            names: vec!["Jo".into()],
            timestamp: 5,
            group_size: 1,
        };
        assert_eq!(format_entry(&entry), "Round 1: Jo");
    }
}
