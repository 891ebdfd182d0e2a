//! Stroke state machine
//!
//! Pointer input is polled once per frame rather than captured as a
//! continuous event stream, so a stroke is modelled as an anchor that chases
//! the pointer: every frame the pointer has moved more than the movement
//! threshold away from the last stamp, a new stamp lands at the pointer and
//! the anchor follows. Fast motion can leave gaps between stamps; the brush
//! radius hides them at ordinary frame rates.

use glam::Vec2;
use tracing::debug;

use crate::canvas::{Canvas, StampRegion};
use crate::constants::MOVEMENT_THRESHOLD;
use crate::input::PointerInput;

/// Stroke progress
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum StrokeState {
    /// No stroke in progress
    #[default]
    Idle,
    /// Stroke in progress; `anchor` is where the last stamp landed
    Active { anchor: Vec2 },
}

/// Outcome of evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStep {
    /// State after the frame
    pub next: StrokeState,
    /// Stamp to apply this frame, if any (at most one per frame)
    pub stamp: Option<Vec2>,
}

impl StrokeState {
    /// Check if a stroke is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Evaluate one frame of input
    ///
    /// Pure transition: nothing is drawn here. A drag stamp is decided
    /// before the release check, so the final movement of a stroke still
    /// lands even when the button comes up in the same frame.
    pub fn advance(self, input: &PointerInput, threshold: f32) -> StrokeStep {
        match self {
            Self::Idle => {
                if input.pointer_down {
                    StrokeStep {
                        next: Self::Active {
                            anchor: input.position,
                        },
                        stamp: Some(input.position),
                    }
                } else {
                    StrokeStep {
                        next: Self::Idle,
                        stamp: None,
                    }
                }
            }
            Self::Active { anchor } => {
                let moved = input.hovering && input.position.distance(anchor) > threshold;
                let stamp = moved.then_some(input.position);

                let next = if input.pointer_up {
                    Self::Idle
                } else if moved {
                    Self::Active {
                        anchor: input.position,
                    }
                } else {
                    self
                };

                StrokeStep { next, stamp }
            }
        }
    }
}

/// Drives a [`Canvas`] from per-frame pointer input
///
/// Holds only the stroke state; the canvas is borrowed for each update.
#[derive(Debug, Clone)]
pub struct StrokeController {
    state: StrokeState,
    threshold: f32,
}

impl Default for StrokeController {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeController {
    /// Create a controller with the default movement threshold
    pub fn new() -> Self {
        Self::with_threshold(MOVEMENT_THRESHOLD)
    }

    /// Create a controller with a custom movement threshold (in cells)
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            state: StrokeState::Idle,
            threshold: threshold.max(0.0),
        }
    }

    /// Get the current stroke state
    #[inline]
    pub fn state(&self) -> StrokeState {
        self.state
    }

    /// Get the movement threshold
    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Evaluate one frame and apply the resulting stamp
    ///
    /// Call exactly once per rendered frame. Returns the cells touched by
    /// this frame's stamp, or `None` when nothing landed on the canvas.
    pub fn update(&mut self, input: &PointerInput, canvas: &mut Canvas) -> Option<StampRegion> {
        let step = self.state.advance(input, self.threshold);

        if step.next.is_active() != self.state.is_active() {
            debug!(
                "StrokeController: {} at ({:.2}, {:.2})",
                if step.next.is_active() { "stroke started" } else { "stroke ended" },
                input.position.x,
                input.position.y
            );
        }
        self.state = step.next;

        step.stamp.and_then(|position| canvas.apply_brush(position))
    }
}
