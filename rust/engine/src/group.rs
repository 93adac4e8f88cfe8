use serde::{Deserialize, Serialize};

/// Number of winners for the round after `round_counter` draws.
///
/// `max(1, initial - round_counter)` in decreasing mode, otherwise `max(1, initial)`.
///
/// # Examples
///
/// ```
/// use luckydraw_engine::group::group_size;
///
/// assert_eq!(group_size(3, 0, true), 3);
/// assert_eq!(group_size(3, 2, true), 1);
/// assert_eq!(group_size(3, 7, true), 1);
/// assert_eq!(group_size(3, 7, false), 3);
/// ```
pub fn group_size(initial: usize, round_counter: u32, decreasing: bool) -> usize {
    let size = if decreasing {
        initial.saturating_sub(round_counter as usize)
    } else {
        initial
    };
    size.max(1)
}

/// Group draw configuration. The current size is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMode {
    /// Draw several winners per round
    pub enabled: bool,
    /// Winners in round 1 (floored at 1)
    pub initial: usize,
    /// Shrink the group by one each round
    pub decreasing: bool,
}

impl Default for GroupMode {
    fn default() -> Self {
        Self {
            enabled: false,
            initial: 1,
            decreasing: false,
        }
    }
}

impl GroupMode {
    pub fn new(enabled: bool, initial: usize, decreasing: bool) -> Self {
        Self {
            enabled,
            initial: initial.max(1),
            decreasing,
        }
    }

    /// Group size after `round_counter` completed rounds, independent of `enabled`.
    pub fn current(&self, round_counter: u32) -> usize {
        group_size(self.initial, round_counter, self.decreasing)
    }

    /// Slots the next draw fills; always 1 outside group mode.
    pub fn slots(&self, round_counter: u32) -> usize {
        if self.enabled {
            self.current(round_counter)
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_floored_at_one() {
        let mode = GroupMode::new(true, 0, false);
        assert_eq!(mode.initial, 1);
        assert_eq!(mode.slots(0), 1);
    }

    #[test]
    fn disabled_mode_ignores_policy() {
        let mode = GroupMode::new(false, 5, false);
        assert_eq!(mode.current(0), 5);
        assert_eq!(mode.slots(0), 1);
    }
}
