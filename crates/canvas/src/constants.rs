/// Canvas width in cells.
pub const WIDTH: usize = 28;

/// Canvas height in cells.
pub const HEIGHT: usize = 28;

/// Total number of cells in the canvas buffer.
pub const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Side length of the square brush kernel.
pub const KERNEL_SIZE: usize = 5;

/// Cells on each side of the kernel centre.
pub const KERNEL_RADIUS: usize = KERNEL_SIZE / 2;

/// Minimum pointer travel (in cells) before an active stroke stamps again.
pub const MOVEMENT_THRESHOLD: f32 = 0.03;
