//! Brush kernel for stamping
//!
//! A stamp is a fixed 5x5 Gaussian-shaped weight grid. Each weight says how
//! far the covered cell moves toward white, so overlapping stamps blend and
//! repeated stamps saturate instead of overflowing.

use crate::constants::{KERNEL_RADIUS, KERNEL_SIZE};

/// Stamp weights, row-major, centred on the middle entry.
pub const GAUSSIAN_KERNEL: [[f32; KERNEL_SIZE]; KERNEL_SIZE] = [
    [0.005, 0.028, 0.050, 0.028, 0.005],
    [0.028, 0.158, 0.281, 0.158, 0.028],
    [0.050, 0.281, 0.500, 0.281, 0.050],
    [0.028, 0.158, 0.281, 0.158, 0.028],
    [0.005, 0.028, 0.050, 0.028, 0.005],
];

/// One kernel entry expressed as an offset from the stamp centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushTap {
    /// Column offset from the centre cell
    pub dx: i32,
    /// Row offset from the centre cell
    pub dy: i32,
    /// Blend weight 0.0-1.0
    pub weight: f32,
}

/// Iterate over every kernel entry, row by row
pub fn kernel_taps() -> impl Iterator<Item = BrushTap> {
    let radius = KERNEL_RADIUS as i32;
    GAUSSIAN_KERNEL.iter().enumerate().flat_map(move |(ky, row)| {
        row.iter().enumerate().map(move |(kx, &weight)| BrushTap {
            dx: kx as i32 - radius,
            dy: ky as i32 - radius,
            weight,
        })
    })
}

/// Move an intensity toward white by `weight`
///
/// Formula: out = v + (255 - v) * weight, clamped to 0..=255 and truncated.
#[inline]
pub fn blend_toward_white(value: u8, weight: f32) -> u8 {
    let v = f32::from(value);
    (v + (255.0 - v) * weight).clamp(0.0, 255.0) as u8
}
