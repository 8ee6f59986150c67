//! Frame controller: which animal is shown and which frame of it.

use log::{debug, warn};

use crate::SpriteCatalog;

/// How an explicit frame index from the pointer mapper is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FramePolicy {
    /// Store the index as given, even outside the sprite's frames
    #[default]
    Passthrough,
    /// Clamp into `[0, frame_count)`
    Clamp,
}

/// Current selection of the zoo.
///
/// `frame_index` is signed: with [`FramePolicy::Passthrough`] the pointer can
/// push it past either end of the filmstrip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerState {
    /// Index into the sprite catalog
    pub gif_index: usize,
    /// Frame of the current sprite
    pub frame_index: i64,
}

impl ControllerState {
    /// Whether `frame_index` addresses a real frame of the current sprite.
    pub fn frame_in_range(&self, catalog: &SpriteCatalog) -> bool {
        (0..catalog.frame_count(self.gif_index) as i64).contains(&self.frame_index)
    }
}

/// Transitions accepted by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    /// Next animal, wrapping to the first
    AdvanceGif,
    /// Previous animal, wrapping to the last
    RetreatGif,
    /// Jump to a specific animal
    SetGif(usize),
    /// Next frame, wrapping to the first
    AdvanceFrame,
    /// Jump to a specific frame
    SetFrame(i64),
    /// Back to frame 0
    ResetFrame,
}

/// Apply one action to a state.
///
/// Every change of `gif_index` goes through [`FrameAction::SetGif`], which
/// always leaves `frame_index` at 0.
///
/// ## Panics
///
/// Panics when asked to select a gif index outside the catalog.
pub fn reduce(
    catalog: &SpriteCatalog,
    policy: FramePolicy,
    state: ControllerState,
    action: FrameAction,
) -> ControllerState {
    let count = catalog.len();
    match action {
        FrameAction::AdvanceGif => reduce(
            catalog,
            policy,
            state,
            FrameAction::SetGif((state.gif_index + 1) % count),
        ),
        FrameAction::RetreatGif => reduce(
            catalog,
            policy,
            state,
            FrameAction::SetGif((state.gif_index + count - 1) % count),
        ),
        FrameAction::SetGif(gif_index) => {
            assert!(
                gif_index < count,
                "gif index {gif_index} out of range for catalog of {count}"
            );
            ControllerState {
                gif_index,
                frame_index: 0,
            }
        }
        FrameAction::AdvanceFrame => {
            let frames = catalog.frame_count(state.gif_index) as i64;
            ControllerState {
                frame_index: (state.frame_index.rem_euclid(frames) + 1) % frames,
                ..state
            }
        }
        FrameAction::SetFrame(frame_index) => {
            let frame_index = match policy {
                FramePolicy::Passthrough => frame_index,
                FramePolicy::Clamp => {
                    let last = catalog.frame_count(state.gif_index) as i64 - 1;
                    frame_index.clamp(0, last)
                }
            };
            ControllerState {
                frame_index,
                ..state
            }
        }
        FrameAction::ResetFrame => ControllerState {
            frame_index: 0,
            ..state
        },
    }
}

/// Owner of the zoo's [`ControllerState`].
///
/// ## Example
///
/// ```rust
/// use petting_zoo_view::{FrameAction, FrameController, SpriteCatalog};
///
/// let mut controller = FrameController::new(SpriteCatalog::default());
///
/// controller.apply(FrameAction::SetFrame(12));
/// assert_eq!(controller.state().frame_index, 12);
///
/// // Changing animal always restarts at frame 0
/// controller.apply(FrameAction::RetreatGif);
/// assert_eq!(controller.state().gif_index, 6);
/// assert_eq!(controller.state().frame_index, 0);
/// ```
#[derive(Clone, Debug)]
pub struct FrameController {
    catalog: SpriteCatalog,
    policy: FramePolicy,
    state: ControllerState,
}

impl FrameController {
    /// Create a controller showing frame 0 of the first sprite.
    pub fn new(catalog: SpriteCatalog) -> Self {
        Self::with_policy(catalog, FramePolicy::default())
    }

    /// Create a controller with an explicit [`FramePolicy`].
    pub fn with_policy(catalog: SpriteCatalog, policy: FramePolicy) -> Self {
        Self {
            catalog,
            policy,
            state: ControllerState::default(),
        }
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    #[inline]
    pub fn catalog(&self) -> &SpriteCatalog {
        &self.catalog
    }

    #[inline]
    pub fn policy(&self) -> FramePolicy {
        self.policy
    }

    /// Apply an action and return the new state.
    pub fn apply(&mut self, action: FrameAction) -> ControllerState {
        let previous = self.state;
        self.state = reduce(&self.catalog, self.policy, previous, action);

        if self.state.gif_index != previous.gif_index {
            debug!(
                "gif {} -> {} ({:?})",
                previous.gif_index, self.state.gif_index, action
            );
        }
        if let FrameAction::SetFrame(frame) = action {
            if !self.state.frame_in_range(&self.catalog) {
                warn!(
                    "frame {} outside 0..{} of gif {}",
                    frame,
                    self.catalog.frame_count(self.state.gif_index),
                    self.state.gif_index
                );
            }
        }
        self.state
    }

    /// Frame count of the sprite currently shown.
    #[inline]
    pub fn current_frame_count(&self) -> u32 {
        self.catalog.frame_count(self.state.gif_index)
    }
}
