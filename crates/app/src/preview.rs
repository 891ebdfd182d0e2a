//! Text preview of the canvas for terminals

use whiteboard_canvas::{Canvas, HEIGHT, WIDTH};

/// Shading ramp from black to white
const RAMP: &[u8] = b" .:-=+*#%@";

/// Render the canvas as one character per cell, two columns wide
pub fn render(canvas: &Canvas) -> String {
    let mut out = String::with_capacity((WIDTH * 2 + 3) * (HEIGHT + 2));
    let border = format!("+{}+\n", "-".repeat(WIDTH * 2));

    out.push_str(&border);
    for row in canvas.buffer().chunks_exact(WIDTH) {
        out.push('|');
        for &value in row {
            let shade = RAMP[usize::from(value) * RAMP.len() / 256] as char;
            out.push(shade);
            out.push(shade);
        }
        out.push_str("|\n");
    }
    out.push_str(&border);
    out
}
