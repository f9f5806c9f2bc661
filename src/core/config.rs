//! Engine configuration.
//!
//! Front ends configure a [`Game`](crate::session::Game) at startup with an
//! `EngineConfig`. The level layout itself is not configuration; it is a
//! [`Layout`](crate::level::Layout) descriptor.

use serde::{Deserialize, Serialize};

/// Default number of undo snapshots kept before the oldest is evicted.
pub const DEFAULT_HISTORY_CAP: usize = 200;

/// Session-level tuning knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum undo snapshots retained. The oldest is evicted (and its
    /// visuals disposed) once this is exceeded.
    pub history_cap: usize,

    /// Play the move/undo cues through the presenter.
    pub play_cues: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_cap: DEFAULT_HISTORY_CAP,
            play_cues: true,
        }
    }
}

impl EngineConfig {
    /// Set the undo history cap.
    #[must_use]
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Enable or disable presenter cues.
    #[must_use]
    pub fn with_cues(mut self, play: bool) -> Self {
        self.play_cues = play;
        self
    }
}
