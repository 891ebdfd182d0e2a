//! Scripted pointer gestures standing in for a real mouse

use glam::Vec2;
use whiteboard_canvas::CanvasRect;

/// Logical distance the pointer travels per frame while dragging
const DRAG_STEP: f32 = 0.5;

/// Raw window-space pointer state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Cursor position in window coordinates, None when outside the window
    pub position: Option<Vec2>,
    /// Button went down this frame
    pub pressed: bool,
    /// Button came up this frame
    pub released: bool,
}

/// Replays a precomputed sequence of pointer samples, one per frame
pub struct ScriptedPointer {
    samples: Vec<PointerSample>,
    cursor: usize,
}

impl ScriptedPointer {
    /// Draw `strokes` (polylines in logical canvas units) on `rect`, then idle
    /// for `idle_frames` frames with the cursor outside the window
    pub fn new(rect: CanvasRect, strokes: &[&[Vec2]], idle_frames: usize) -> Self {
        let mut samples = Vec::new();

        for stroke in strokes {
            let Some((&first, rest)) = stroke.split_first() else {
                continue;
            };

            samples.push(PointerSample {
                position: Some(rect.to_window(first)),
                pressed: true,
                released: false,
            });

            let mut from = first;
            for &to in rest {
                let steps = ((to - from).length() / DRAG_STEP).ceil().max(1.0) as usize;
                for step in 1..=steps {
                    let t = step as f32 / steps as f32;
                    samples.push(PointerSample {
                        position: Some(rect.to_window(from.lerp(to, t))),
                        pressed: false,
                        released: false,
                    });
                }
                from = to;
            }

            samples.push(PointerSample {
                position: Some(rect.to_window(from)),
                pressed: false,
                released: true,
            });
        }

        samples.extend(std::iter::repeat_n(
            PointerSample {
                position: None,
                pressed: false,
                released: false,
            },
            idle_frames,
        ));

        Self { samples, cursor: 0 }
    }

    /// A single-stroke "7"
    pub fn seven(rect: CanvasRect, idle_frames: usize) -> Self {
        let stroke = [Vec2::new(7.0, 6.0), Vec2::new(21.0, 6.0), Vec2::new(12.0, 23.0)];
        Self::new(rect, &[&stroke], idle_frames)
    }
}

impl Iterator for ScriptedPointer {
    type Item = PointerSample;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScriptedPointer {}
