//! The presenter contract: how the engine talks to rendering and audio.
//!
//! The engine never owns models, textures or sounds. It asks a
//! [`Presenter`] for an opaque [`VisualHandle`] when a piece appears, tells
//! it where pieces go, and tells it when a handle is no longer needed. Asset
//! loading and caching happen entirely on the presenter side and must be
//! finished before a level is built; every call here is synchronous.
//!
//! ## Implementations
//!
//! - [`Headless`]: hands out handles and does nothing else. Used for
//!   simulation and training.
//! - [`Recorder`]: records every call and tracks live handles, so tests can
//!   check for leaks and double disposal.

mod headless;
mod recorder;

pub use headless::Headless;
pub use recorder::{Recorder, VisualCommand};

use serde::{Deserialize, Serialize};

use crate::core::Kind;

/// Opaque reference to a presenter-owned model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

impl VisualHandle {
    /// Placeholder carried by an entity before a presenter has bound it.
    pub const UNBOUND: VisualHandle = VisualHandle(u64::MAX);

    /// Check if a presenter has bound this handle.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        self.0 != u64::MAX
    }
}

impl std::fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_bound() {
            write!(f, "Visual({})", self.0)
        } else {
            f.write_str("Visual(unbound)")
        }
    }
}

/// Model position in grid units.
///
/// `x`/`z` are cell coordinates; `y` is the stack slot plus the kind's
/// vertical offset. Mapping to world space is up to the presenter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Rendering and audio collaborator.
///
/// All calls are fire-and-forget from the engine's point of view.
pub trait Presenter {
    /// Create a model for a piece of `kind`.
    fn acquire_visual(&mut self, kind: Kind, at: VisualPosition, rotation: f32) -> VisualHandle;

    /// Move a model to a new cell and height.
    fn move_visual(&mut self, handle: VisualHandle, to: VisualPosition);

    /// Change only a model's height (its stack slot changed).
    fn set_visual_height(&mut self, handle: VisualHandle, y: f32);

    /// Release a model. The handle must not be used afterwards.
    fn dispose_visual(&mut self, handle: VisualHandle);

    /// Turn a model to face its direction of travel.
    fn face_visual(&mut self, _handle: VisualHandle, _rotation: f32) {}

    /// Sound played after a move input.
    fn play_move_cue(&mut self);

    /// Sound played after an undo.
    fn play_undo_cue(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn acquire_visual(&mut self, kind: Kind, at: VisualPosition, rotation: f32) -> VisualHandle {
        (**self).acquire_visual(kind, at, rotation)
    }

    fn move_visual(&mut self, handle: VisualHandle, to: VisualPosition) {
        (**self).move_visual(handle, to);
    }

    fn set_visual_height(&mut self, handle: VisualHandle, y: f32) {
        (**self).set_visual_height(handle, y);
    }

    fn dispose_visual(&mut self, handle: VisualHandle) {
        (**self).dispose_visual(handle);
    }

    fn face_visual(&mut self, handle: VisualHandle, rotation: f32) {
        (**self).face_visual(handle, rotation);
    }

    fn play_move_cue(&mut self) {
        (**self).play_move_cue();
    }

    fn play_undo_cue(&mut self) {
        (**self).play_undo_cue();
    }
}

/// Immutable scene dressing of a level: floor, lights, cameras, view arrows.
///
/// The engine only carries the handles. Snapshots share one `Furniture`
/// through an `Arc`, so it must be disposed exactly once, by whoever tears
/// the session down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Furniture {
    handles: Vec<VisualHandle>,
}

impl Furniture {
    /// Wrap presenter handles created for a level's scene dressing.
    #[must_use]
    pub fn new(handles: Vec<VisualHandle>) -> Self {
        Self { handles }
    }

    /// The wrapped handles.
    #[must_use]
    pub fn handles(&self) -> &[VisualHandle] {
        &self.handles
    }

    /// Check if there is no furniture.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Release every handle through `presenter`.
    pub fn dispose(&self, presenter: &mut dyn Presenter) {
        for &handle in &self.handles {
            presenter.dispose_visual(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_handle() {
        assert!(!VisualHandle::UNBOUND.is_bound());
        assert!(VisualHandle(0).is_bound());
        assert_eq!(format!("{}", VisualHandle(3)), "Visual(3)");
        assert_eq!(format!("{}", VisualHandle::UNBOUND), "Visual(unbound)");
    }

    #[test]
    fn test_furniture_dispose() {
        let mut recorder = Recorder::new();
        let floor = recorder.acquire_visual(
            Kind::Noun(crate::core::NounKind::Wall),
            VisualPosition::default(),
            0.0,
        );
        let furniture = Furniture::new(vec![floor]);

        furniture.dispose(&mut recorder);

        assert_eq!(recorder.live_count(), 0);
        assert!(recorder.disposal_faults().is_empty());
    }

    #[test]
    fn test_presenter_through_mut_ref() {
        let mut headless = Headless::new();
        let mut by_ref = &mut headless;
        let handle = by_ref.acquire_visual(
            Kind::Noun(crate::core::NounKind::Rock),
            VisualPosition::default(),
            0.0,
        );
        assert!(handle.is_bound());
        assert_eq!(headless.acquired(), 1);
    }
}
