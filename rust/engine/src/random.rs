//! Uniform index sources used by the random pass of a draw.
//!
//! Every source reports which kind of generator produced the index so the
//! host can show the operator whether a draw came from OS-seeded
//! cryptographic randomness or from a fallback generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Kind of generator behind a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Randomness {
    /// ChaCha20 keyed from operating system entropy
    #[serde(rename = "crypto")]
    Secure,
    /// Predictable or clock-seeded generator
    #[serde(rename = "math")]
    Fallback,
}

impl Randomness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Randomness::Secure => "crypto",
            Randomness::Fallback => "math",
        }
    }
}

/// Picks a uniformly distributed index below `len`.
///
/// Callers must never pass `len == 0`; the draw engine only samples from
/// non-empty candidate sets.
pub trait IndexSource: Send {
    fn pick(&mut self, len: usize) -> (usize, Randomness);
}

/// Production source: ChaCha20 keyed from OS entropy, or a clock-seeded
/// generator when the OS refuses to provide entropy.
#[derive(Debug)]
pub struct SystemIndexSource {
    rng: ChaCha20Rng,
    randomness: Randomness,
}

impl SystemIndexSource {
    pub fn new() -> Self {
        match ChaCha20Rng::try_from_os_rng() {
            Ok(rng) => Self {
                rng,
                randomness: Randomness::Secure,
            },
            Err(e) => {
                tracing::warn!(error = %e, "OS entropy unavailable, using clock-seeded generator");
                Self {
                    rng: ChaCha20Rng::seed_from_u64(clock_seed()),
                    randomness: Randomness::Fallback,
                }
            }
        }
    }

    pub fn randomness(&self) -> Randomness {
        self.randomness
    }
}

impl Default for SystemIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for SystemIndexSource {
    fn pick(&mut self, len: usize) -> (usize, Randomness) {
        debug_assert!(len > 0, "pick called on an empty candidate set");
        (self.rng.random_range(0..len), self.randomness)
    }
}

/// Reproducible source for replays and tests. Reports [`Randomness::Fallback`]
/// since anyone holding the seed can predict every pick.
///
/// # Examples
///
/// ```
/// use luckydraw_engine::random::{IndexSource, SeededIndexSource};
///
/// let mut a = SeededIndexSource::new(42);
/// let mut b = SeededIndexSource::new(42);
/// assert_eq!(a.pick(10), b.pick(10));
/// ```
#[derive(Debug)]
pub struct SeededIndexSource {
    rng: ChaCha20Rng,
}

impl SeededIndexSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl IndexSource for SeededIndexSource {
    fn pick(&mut self, len: usize) -> (usize, Randomness) {
        debug_assert!(len > 0, "pick called on an empty candidate set");
        (self.rng.random_range(0..len), Randomness::Fallback)
    }
}

fn clock_seed() -> u64 {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default() as u64;
    nanos ^ u64::from(std::process::id()).rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_picks_stay_in_range() {
        let mut src = SeededIndexSource::new(7);
        for len in 1..50 {
            let (idx, kind) = src.pick(len);
            assert!(idx < len);
            assert_eq!(kind, Randomness::Fallback);
        }
    }

    #[test]
    fn single_candidate_always_index_zero() {
        let mut src = SystemIndexSource::new();
        for _ in 0..20 {
            assert_eq!(src.pick(1).0, 0);
        }
    }

    #[test]
    fn randomness_serializes_with_legacy_labels() {
        assert_eq!(Randomness::Secure.as_str(), "crypto");
        assert_eq!(Randomness::Fallback.as_str(), "math");
    }
}
