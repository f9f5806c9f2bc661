//! Presenter with no output.

use super::{Presenter, VisualHandle, VisualPosition};
use crate::core::Kind;

/// Presenter that allocates sequential handles and renders nothing.
#[derive(Clone, Debug, Default)]
pub struct Headless {
    next_handle: u64,
    disposed: u64,
}

impl Headless {
    /// Create a new headless presenter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total handles handed out.
    #[must_use]
    pub fn acquired(&self) -> u64 {
        self.next_handle
    }

    /// Handles handed out and not yet disposed.
    #[must_use]
    pub fn live(&self) -> u64 {
        self.next_handle.saturating_sub(self.disposed)
    }
}

impl Presenter for Headless {
    fn acquire_visual(&mut self, _kind: Kind, _at: VisualPosition, _rotation: f32) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn move_visual(&mut self, _handle: VisualHandle, _to: VisualPosition) {}

    fn set_visual_height(&mut self, _handle: VisualHandle, _y: f32) {}

    fn dispose_visual(&mut self, _handle: VisualHandle) {
        self.disposed += 1;
    }

    fn play_move_cue(&mut self) {}

    fn play_undo_cue(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NounKind;

    #[test]
    fn test_sequential_handles() {
        let mut presenter = Headless::new();
        let kind = Kind::Noun(NounKind::Flag);

        let a = presenter.acquire_visual(kind, VisualPosition::default(), 0.0);
        let b = presenter.acquire_visual(kind, VisualPosition::default(), 0.0);

        assert_eq!(a, VisualHandle(0));
        assert_eq!(b, VisualHandle(1));
        assert_eq!(presenter.live(), 2);

        presenter.dispose_visual(a);
        assert_eq!(presenter.live(), 1);
        assert_eq!(presenter.acquired(), 2);
    }
}
