//! JSON state file shared by every stateful command.
//!
//! A missing file means a fresh start. A file that cannot be read, parsed
//! or restored is reported and ignored; nothing from it is applied.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use luckydraw_engine::clock::SystemClock;
use luckydraw_engine::engine::DrawEngine;
use luckydraw_engine::random::{IndexSource, SeededIndexSource, SystemIndexSource};
use luckydraw_engine::snapshot::PersistedState;

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils;
use crate::ui;

#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads saved state. Problems other than a missing file are written
    /// to `err` as warnings and treated as no prior state.
    pub fn load(&self, err: &mut dyn Write) -> Result<Option<PersistedState>, CliError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) => {
                self.discard(err, &e.to_string())?;
                return Ok(None);
            }
        };
        match serde_json::from_str::<PersistedState>(text.trim_start_matches('\u{feff}')) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                self.discard(err, &e.to_string())?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, state: &PersistedState) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(state).map_err(std::io::Error::other)?;
        io_utils::write_atomic(&self.path, &json).map_err(|e| CliError::Io(std::io::Error::other(e)))?;
        tracing::debug!(path = %self.path.display(), "state saved");
        Ok(())
    }

    /// Deletes the state file. Returns whether there was one.
    pub fn clear(&self) -> Result<bool, CliError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CliError::Io(e)),
        }
    }

    fn discard(&self, err: &mut dyn Write, reason: &str) -> Result<(), CliError> {
        tracing::warn!(path = %self.path.display(), reason, "saved state discarded");
        ui::display_warning(
            err,
            &format!(
                "Ignoring saved state in {}: {}",
                self.path.display(),
                reason
            ),
        )?;
        Ok(())
    }
}

fn index_source(config: &Config) -> Box<dyn IndexSource> {
    match config.seed {
        Some(seed) => Box::new(SeededIndexSource::new(seed)),
        None => Box::new(SystemIndexSource::new()),
    }
}

/// Builds the engine for one command from the configured state file.
pub fn open_engine(config: &Config, err: &mut dyn Write) -> Result<(StateStore, DrawEngine), CliError> {
    let store = StateStore::new(&config.state_path);
    let clock = Arc::new(SystemClock);
    let engine = match store.load(err)? {
        Some(state) => match DrawEngine::restore(state, index_source(config), clock.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                store.discard(err, &e.to_string())?;
                DrawEngine::new(index_source(config), clock)
            }
        },
        None => DrawEngine::new(index_source(config), clock),
    };
    Ok((store, engine.with_reveal_delay_ms(i64::from(config.reveal_delay_ms))))
}

/// Reveals anything still pending and writes the engine back.
pub fn persist(store: &StateStore, engine: &mut DrawEngine) -> Result<(), CliError> {
    engine.flush_reveals();
    store.save(&engine.to_persisted())
}
