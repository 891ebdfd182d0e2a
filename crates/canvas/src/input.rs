//! Pointer input for the stroke state machine
//!
//! The host samples its pointer once per frame and hands the result over as
//! a [`PointerInput`]. [`CanvasRect`] maps window coordinates into logical
//! canvas space for hosts that draw the canvas as a scaled image.

use glam::Vec2;

use crate::constants::{HEIGHT, WIDTH};

/// Canvas extent in logical (cell) units
pub const CANVAS_SIZE: Vec2 = Vec2::new(WIDTH as f32, HEIGHT as f32);

/// One frame of pointer state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Button went down this frame while over the canvas
    pub pointer_down: bool,
    /// Button was released this frame (anywhere)
    pub pointer_up: bool,
    /// Pointer is currently over the canvas
    pub hovering: bool,
    /// Logical position in cell units, meaningful only while hovering
    pub position: Vec2,
}

impl PointerInput {
    /// Pointer away from the canvas, no button activity
    pub fn away() -> Self {
        Self::default()
    }

    /// Pointer over the canvas at `position`, no button activity
    pub fn hover(position: Vec2) -> Self {
        Self {
            hovering: true,
            position,
            ..Default::default()
        }
    }

    /// Button pressed over the canvas at `position`
    pub fn press(position: Vec2) -> Self {
        Self {
            pointer_down: true,
            ..Self::hover(position)
        }
    }

    /// Button released while hovering at `position`
    pub fn release(position: Vec2) -> Self {
        Self {
            pointer_up: true,
            ..Self::hover(position)
        }
    }
}

/// Where the canvas image sits in window space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    /// Top-left corner in window coordinates
    pub min: Vec2,
    /// Displayed size in window coordinates
    pub size: Vec2,
}

impl CanvasRect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Map a window-space position into logical canvas space
    ///
    /// Formula: logical = CANVAS_SIZE * (pointer - min) / size
    #[inline]
    pub fn to_logical(&self, pointer: Vec2) -> Vec2 {
        CANVAS_SIZE * (pointer - self.min) / self.size
    }

    /// Map a logical canvas position back into window space
    #[inline]
    pub fn to_window(&self, logical: Vec2) -> Vec2 {
        self.min + logical * self.size / CANVAS_SIZE
    }

    /// Check whether a window-space position lies over the canvas
    pub fn contains(&self, pointer: Vec2) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return false;
        }
        let max = self.min + self.size;
        pointer.x >= self.min.x && pointer.y >= self.min.y && pointer.x < max.x && pointer.y < max.y
    }

    /// Build a frame's input from raw window-space pointer state
    ///
    /// `pressed` and `released` are the button edges of this frame. A press
    /// only counts when it lands on the canvas; a release counts anywhere.
    pub fn pointer_input(&self, pointer: Option<Vec2>, pressed: bool, released: bool) -> PointerInput {
        let hovering = pointer.is_some_and(|p| self.contains(p));
        let position = match pointer {
            Some(p) if hovering => self.to_logical(p),
            _ => Vec2::ZERO,
        };

        PointerInput {
            pointer_down: pressed && hovering,
            pointer_up: released,
            hovering,
            position,
        }
    }
}
