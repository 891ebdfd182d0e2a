//! Fixed-size grayscale canvas with brush stamping

use glam::Vec2;
use tracing::debug;

use crate::brush::{blend_toward_white, kernel_taps};
use crate::constants::{HEIGHT, KERNEL_RADIUS, PIXEL_COUNT, WIDTH};

/// Raw canvas contents, row-major, one intensity byte per cell
pub type Buffer = [u8; PIXEL_COUNT];

/// Clipped bounding box of the cells touched by one stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl StampRegion {
    /// Smallest region covering both `self` and `other`
    pub fn union(self, other: StampRegion) -> StampRegion {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let x_end = (self.x + self.width).max(other.x + other.width);
        let y_end = (self.y + self.height).max(other.y + other.height);
        StampRegion {
            x,
            y,
            width: x_end - x,
            height: y_end - y,
        }
    }
}

/// Check whether a kernel centred on `center` can reach a cell in `0..extent`
#[inline]
fn kernel_reaches(center: i32, extent: usize) -> bool {
    let radius = KERNEL_RADIUS as i32;
    center >= -radius && center < extent as i32 + radius
}

/// A 28x28 grayscale raster
///
/// Cells start black (0) and only move toward white (255) through
/// [`Canvas::apply_brush`]. [`Canvas::clear`] is the only way back.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Pixel data in row-major order
    pixels: Buffer,
    /// Set when the buffer changed since the last `take_dirty`
    dirty: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new zero-filled canvas
    pub fn new() -> Self {
        Self {
            pixels: [0; PIXEL_COUNT],
            dirty: false,
        }
    }

    /// Stamp the brush kernel centred on `position`
    ///
    /// `position` is in cell units. The centre cell is the position truncated
    /// toward zero; kernel cells falling outside the canvas are skipped.
    ///
    /// Returns the bounding box of affected cells, or None if the stamp
    /// missed the canvas entirely.
    pub fn apply_brush(&mut self, position: Vec2) -> Option<StampRegion> {
        if !position.is_finite() {
            debug!("Canvas::apply_brush: non-finite position {:?}, skipped", position);
            return None;
        }

        // Casts saturate, so far-off positions are rejected before any offset is added
        let center_x = position.x as i32;
        let center_y = position.y as i32;
        if !kernel_reaches(center_x, WIDTH) || !kernel_reaches(center_y, HEIGHT) {
            debug!(
                "Canvas::apply_brush: ({:.2}, {:.2}) outside canvas",
                position.x, position.y
            );
            return None;
        }

        let mut x_min = i32::MAX;
        let mut y_min = i32::MAX;
        let mut x_max = i32::MIN;
        let mut y_max = i32::MIN;

        for tap in kernel_taps() {
            let ix = center_x + tap.dx;
            let iy = center_y + tap.dy;

            if ix < 0 || iy < 0 || ix >= WIDTH as i32 || iy >= HEIGHT as i32 {
                continue;
            }

            let index = iy as usize * WIDTH + ix as usize;
            self.pixels[index] = blend_toward_white(self.pixels[index], tap.weight);

            x_min = x_min.min(ix);
            y_min = y_min.min(iy);
            x_max = x_max.max(ix);
            y_max = y_max.max(iy);
        }

        if x_min > x_max {
            debug!(
                "Canvas::apply_brush: ({:.2}, {:.2}) outside canvas",
                position.x, position.y
            );
            return None;
        }

        self.dirty = true;

        let region = StampRegion {
            x: x_min as u32,
            y: y_min as u32,
            width: (x_max - x_min + 1) as u32,
            height: (y_max - y_min + 1) as u32,
        };
        debug!(
            "Canvas::apply_brush: ({:.2}, {:.2}) -> region ({}, {}) {}x{}",
            position.x, position.y, region.x, region.y, region.width, region.height
        );
        Some(region)
    }

    /// Reset every cell to black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.dirty = true;
    }

    /// Read-only view of the buffer
    ///
    /// Stamps mutate in place, so copy the buffer if a stable snapshot is
    /// needed across frames.
    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.pixels
    }

    /// Get a cell intensity, None if out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(self.pixels[y * WIDTH + x])
    }

    /// Check whether the buffer changed since the last `take_dirty`
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and reset it
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
