//! Shared access to a [`DrawEngine`] and a background auto-draw driver.
//!
//! Every session call holds the engine lock for the whole operation, so a
//! timer-driven draw and a manual draw, undo or reset never interleave.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::autodraw::MAX_POLL_MS;
use crate::engine::{DrawEngine, TickOutcome};
use crate::errors::DrawError;
use crate::history::HistoryEntry;
use crate::snapshot::EngineSnapshot;

#[derive(Debug, Clone)]
pub struct DrawSession {
    engine: Arc<Mutex<DrawEngine>>,
}

impl DrawSession {
    pub fn new(engine: DrawEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine operations never leave partial state behind, so a poisoned
    // lock still guards a consistent engine.
    fn lock(&self) -> MutexGuard<'_, DrawEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut DrawEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn draw(&self) -> Result<HistoryEntry, DrawError> {
        self.lock().draw()
    }

    pub fn undo(&self) -> Option<HistoryEntry> {
        self.lock().undo()
    }

    pub fn apply_names(&self, names: Vec<String>) {
        self.lock().apply_names(names)
    }

    pub fn configure_auto_draw(&self, enabled: bool, interval_secs: u32) {
        self.lock().configure_auto_draw(enabled, interval_secs)
    }

    pub fn tick(&self) -> TickOutcome {
        self.lock().tick()
    }

    pub fn current_state(&self) -> EngineSnapshot {
        self.lock().current_state()
    }

    /// Takes the engine back once every other handle is gone.
    pub fn into_inner(self) -> Result<DrawEngine, Self> {
        match Arc::try_unwrap(self.engine) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(engine) => Err(Self { engine }),
        }
    }
}

/// Notifications from the driver thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoDrawEvent {
    Drawn(HistoryEntry),
    Refused(DrawError),
    /// Auto-draw is no longer armed (pool exhausted or disabled by another
    /// caller); the driver exits after sending this
    Disarmed,
}

/// Polls [`DrawEngine::tick`] on a background thread while auto-draw is armed.
#[derive(Debug)]
pub struct AutoDrawDriver;

impl AutoDrawDriver {
    /// Starts polling every `poll` (capped at 250 ms). The thread exits when
    /// auto-draw is no longer armed, or when the handle is stopped.
    pub fn spawn(session: DrawSession, poll: Duration) -> (AutoDrawHandle, Receiver<AutoDrawEvent>) {
        let poll = poll.min(Duration::from_millis(MAX_POLL_MS));
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let thread_stop = Arc::clone(&stop);
        let thread_session = session.clone();
        let join = thread::spawn(move || drive(thread_session, poll, thread_stop, tx));
        (
            AutoDrawHandle {
                session,
                stop,
                join: Some(join),
            },
            rx,
        )
    }
}

fn drive(session: DrawSession, poll: Duration, stop: Arc<AtomicBool>, tx: Sender<AutoDrawEvent>) {
    loop {
        let outcome = {
            let mut engine = session.lock();
            // Checked under the lock: once `stop` is set no further tick runs.
            if stop.load(Ordering::SeqCst) {
                return;
            }
            engine.tick()
        };
        let event = match outcome {
            TickOutcome::Waiting { .. } => None,
            TickOutcome::Fired(Ok(entry)) => Some(AutoDrawEvent::Drawn(entry)),
            TickOutcome::Fired(Err(e)) => Some(AutoDrawEvent::Refused(e)),
            TickOutcome::Idle | TickOutcome::Disabled => {
                let _ = tx.send(AutoDrawEvent::Disarmed);
                return;
            }
        };
        if let Some(event) = event {
            if tx.send(event).is_err() {
                tracing::debug!("auto-draw listener dropped");
            }
        }
        thread::sleep(poll);
    }
}

pub struct AutoDrawHandle {
    session: DrawSession,
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl AutoDrawHandle {
    /// Disables auto-draw and stops the driver. No draw happens after this
    /// returns.
    pub fn stop(&mut self) {
        {
            let mut engine = self.session.lock();
            self.stop.store(true, Ordering::SeqCst);
            let interval = engine.auto_draw().interval_secs;
            engine.configure_auto_draw(false, interval);
        }
        self.join_thread();
    }

    /// Waits for the driver to exit on its own.
    pub fn wait(mut self) {
        self.join_thread();
    }

    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn join_thread(&mut self) {
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::error!("auto-draw driver panicked");
            }
        }
    }
}

impl Drop for AutoDrawHandle {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.stop();
        }
    }
}

impl std::fmt::Debug for AutoDrawHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoDrawHandle")
            .field("stopped", &self.stop.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
