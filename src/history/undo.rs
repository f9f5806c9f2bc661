//! Bounded snapshot stack.

use std::collections::VecDeque;

use log::debug;

use crate::core::DEFAULT_HISTORY_CAP;
use crate::error::{EngineError, EngineResult};
use crate::level::Level;
use crate::rules::Derivation;
use crate::visual::Presenter;

/// Undo history: whole-level snapshots, newest last.
///
/// Holds at most `cap` snapshots. Recording past the cap evicts the oldest
/// and disposes its handles.
#[derive(Debug)]
pub struct History {
    snapshots: VecDeque<Level>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl History {
    /// Create an empty history holding at most `cap` snapshots.
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cap,
        }
    }

    /// Maximum number of snapshots kept.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Number of snapshots stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if there is nothing to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Push a snapshot, evicting the oldest ones past the cap.
    pub fn record(&mut self, snapshot: Level, presenter: &mut dyn Presenter) {
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.cap {
            if let Some(evicted) = self.snapshots.pop_front() {
                debug!("history full ({}), evicting oldest snapshot", self.cap);
                evicted.dispose(presenter);
            }
        }
    }

    /// Replace `current` with the newest snapshot and re-derive its rules.
    ///
    /// The replaced level's handles are disposed.
    pub fn undo(
        &mut self,
        current: &mut Level,
        presenter: &mut dyn Presenter,
    ) -> EngineResult<Derivation> {
        let previous = self.snapshots.pop_back().ok_or(EngineError::UndoUnderflow)?;
        let replaced = std::mem::replace(current, previous);
        replaced.dispose(presenter);

        let derivation = current.update_rules(presenter);
        debug!("undo: {} snapshots left", self.snapshots.len());
        Ok(derivation)
    }

    /// Drop every snapshot, disposing their handles.
    pub fn clear(&mut self, presenter: &mut dyn Presenter) {
        for snapshot in self.snapshots.drain(..) {
            snapshot.dispose(presenter);
        }
    }
}
