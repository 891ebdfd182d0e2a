//! Digit whiteboard canvas - raster, brush and stroke state machine
//!
//! This crate provides the drawing core of the whiteboard:
//! - [`canvas::Canvas`] - Fixed 28x28 grayscale raster with brush stamping
//! - [`brush`] - Gaussian stamp kernel and approach-toward-white blend
//! - [`stroke::StrokeController`] - Per-frame stroke state machine
//! - [`input`] - Pointer input snapshot and window-to-canvas mapping
//!
//! Nothing here knows about windows, textures or prediction backends.

pub mod brush;
pub mod canvas;
pub mod constants;
pub mod input;
pub mod stroke;

pub use brush::*;
pub use canvas::*;
pub use constants::*;
pub use input::*;
pub use stroke::*;
