//! Presenter that records every call, for tests and replays.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{Presenter, VisualHandle, VisualPosition};
use crate::core::Kind;

/// One presenter call, as seen by a [`Recorder`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VisualCommand {
    Acquire {
        handle: VisualHandle,
        kind: Kind,
        at: VisualPosition,
        rotation: f32,
    },
    Move {
        handle: VisualHandle,
        to: VisualPosition,
    },
    SetHeight {
        handle: VisualHandle,
        y: f32,
    },
    Face {
        handle: VisualHandle,
        rotation: f32,
    },
    Dispose {
        handle: VisualHandle,
    },
    MoveCue,
    UndoCue,
}

/// Presenter that keeps a log of calls and the set of live handles.
///
/// Using or disposing a handle that is not live (never acquired, or
/// already disposed) is recorded as a fault instead of panicking; tests
/// assert on [`Recorder::disposal_faults`] at the end.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    next_handle: u64,
    commands: Vec<VisualCommand>,
    live: FxHashMap<VisualHandle, Kind>,
    faults: Vec<VisualHandle>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[VisualCommand] {
        &self.commands
    }

    /// Drain the call log, keeping the live-handle bookkeeping.
    pub fn take_commands(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of handles acquired and not yet disposed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Check if a handle is live.
    #[must_use]
    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains_key(&handle)
    }

    /// Kind a live handle was acquired for.
    #[must_use]
    pub fn kind_of(&self, handle: VisualHandle) -> Option<Kind> {
        self.live.get(&handle).copied()
    }

    /// Handles disposed while not live.
    #[must_use]
    pub fn disposal_faults(&self) -> &[VisualHandle] {
        &self.faults
    }

    /// Number of move cues played.
    #[must_use]
    pub fn move_cues(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, VisualCommand::MoveCue))
            .count()
    }

    /// Number of undo cues played.
    #[must_use]
    pub fn undo_cues(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, VisualCommand::UndoCue))
            .count()
    }

    fn touch(&mut self, handle: VisualHandle) {
        // Any use of a handle that is not live is a fault.
        if !self.live.contains_key(&handle) {
            self.faults.push(handle);
        }
    }
}

impl Presenter for Recorder {
    fn acquire_visual(&mut self, kind: Kind, at: VisualPosition, rotation: f32) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, kind);
        self.commands.push(VisualCommand::Acquire {
            handle,
            kind,
            at,
            rotation,
        });
        handle
    }

    fn move_visual(&mut self, handle: VisualHandle, to: VisualPosition) {
        self.touch(handle);
        self.commands.push(VisualCommand::Move { handle, to });
    }

    fn set_visual_height(&mut self, handle: VisualHandle, y: f32) {
        self.touch(handle);
        self.commands.push(VisualCommand::SetHeight { handle, y });
    }

    fn face_visual(&mut self, handle: VisualHandle, rotation: f32) {
        self.touch(handle);
        self.commands.push(VisualCommand::Face { handle, rotation });
    }

    fn dispose_visual(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_none() {
            self.faults.push(handle);
        }
        self.commands.push(VisualCommand::Dispose { handle });
    }

    fn play_move_cue(&mut self) {
        self.commands.push(VisualCommand::MoveCue);
    }

    fn play_undo_cue(&mut self) {
        self.commands.push(VisualCommand::UndoCue);
    }
}
