//! # luckydraw-engine: Rigged-or-Random Name Draw Core
//!
//! Draws names from a pool without replacement, one round at a time,
//! honoring operator rig rules that force a name to win a specific round.
//! Covers the pool/round state machine, undo, group draws, and the
//! auto-draw timer. Persistence, rendering and input parsing belong to the
//! host.
//!
//! ## Core Modules
//!
//! - [`engine`] - `DrawEngine`: draw, undo, reset, configuration, snapshots
//! - [`rig`] - Rig rules and their store
//! - [`group`] - Group-size policy
//! - [`autodraw`] - Auto-draw scheduler state machine
//! - [`random`] - Uniform index sources (OS-seeded ChaCha20 or seeded)
//! - [`history`] - History entries, legacy upgrade, reveal-delay queue
//! - [`snapshot`] - Read-only snapshot and persisted-state model
//! - [`session`] - Lock-guarded shared engine and background auto-draw driver
//! - [`clock`] - System and manual clocks
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use luckydraw_engine::clock::ManualClock;
//! use luckydraw_engine::engine::DrawEngine;
//! use luckydraw_engine::random::SeededIndexSource;
//!
//! let mut engine = DrawEngine::new(
//!     Box::new(SeededIndexSource::new(42)),
//!     Arc::new(ManualClock::new(0)),
//! );
//! engine.apply_names(vec!["Ada".into(), "Miles".into(), "Jo".into(), "Sal".into()]);
//!
//! let entry = engine.draw().expect("pool is not empty");
//! assert_eq!(entry.round, 1);
//! assert_eq!(engine.pool().len(), 3);
//!
//! engine.undo();
//! assert_eq!(engine.pool().len(), 4);
//! assert_eq!(engine.round_counter(), 0);
//! ```
//!
//! ## Group Draws
//!
//! ```rust
//! use luckydraw_engine::engine::DrawEngine;
//!
//! let mut engine = DrawEngine::default();
//! engine.apply_names((1..=6).map(|i| format!("P{i}")).collect());
//! engine.configure_group_mode(true, 3, true);
//!
//! assert_eq!(engine.draw().unwrap().names.len(), 3);
//! assert_eq!(engine.draw().unwrap().names.len(), 2);
//! assert_eq!(engine.draw().unwrap().names.len(), 1);
//! ```

pub mod autodraw;
pub mod clock;
pub mod engine;
pub mod errors;
pub mod group;
pub mod history;
pub mod random;
pub mod rig;
pub mod session;
pub mod snapshot;
