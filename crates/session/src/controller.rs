//! Session controller

use std::time::Instant;

use tracing::{debug, info, warn};
use whiteboard_canvas::{Canvas, PointerInput, StampRegion, StrokeController, StrokeState};
use whiteboard_comm::{ChannelError, CommunicationChannel};
use whiteboard_config::WhiteboardConfig;

use crate::prediction::Prediction;
use crate::rate_limit::RateLimiter;

/// What happened during one `on_frame` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Cells touched by this frame's brush stamp, if one landed
    pub stamp: Option<StampRegion>,
    /// Whether the canvas was handed to the channel
    pub sent: bool,
    /// Raw value received from the channel this frame
    pub received: Option<u8>,
}

/// Per-frame orchestration of drawing, transmission and predictions
///
/// Exclusively owns the canvas, the stroke state, the channel, the send
/// timer and the prediction cache. Channel failures are logged and skipped;
/// nothing the backend does can stall or corrupt the drawing state.
pub struct SessionController<C: CommunicationChannel> {
    canvas: Canvas,
    stroke: StrokeController,
    channel: C,
    limiter: RateLimiter,
    last_prediction: Option<u8>,
}

impl<C: CommunicationChannel> SessionController<C> {
    /// Create a session whose send timer starts now
    pub fn new(channel: C, config: &WhiteboardConfig) -> Self {
        Self::with_start(channel, config, Instant::now())
    }

    /// Create a session whose send timer starts at `start`
    pub fn with_start(channel: C, config: &WhiteboardConfig, start: Instant) -> Self {
        info!(
            "Starting whiteboard session (send interval {:?}, movement threshold {})",
            config.send_interval(),
            config.movement_threshold
        );
        Self {
            canvas: Canvas::new(),
            stroke: StrokeController::with_threshold(config.movement_threshold),
            channel,
            limiter: RateLimiter::new(config.send_interval(), start),
            last_prediction: None,
        }
    }

    /// Run one frame using the current time
    pub fn on_frame(&mut self, input: &PointerInput) -> FrameReport {
        self.on_frame_at(input, Instant::now())
    }

    /// Run one frame at `now`
    ///
    /// 1. Evaluate the stroke machine (may stamp the canvas)
    /// 2. Poll the channel for at most one prediction
    /// 3. Send the canvas if the send interval has elapsed, drawn or not
    pub fn on_frame_at(&mut self, input: &PointerInput, now: Instant) -> FrameReport {
        let stamp = self.stroke.update(input, &mut self.canvas);
        let received = self.poll_prediction();
        let sent = self.send_if_due(now);

        FrameReport {
            stamp,
            sent,
            received,
        }
    }

    fn poll_prediction(&mut self) -> Option<u8> {
        let value = match self.channel.recv() {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!("Prediction poll failed: {}", e);
                return None;
            }
        };

        if self.last_prediction != Some(value) {
            match Prediction::from_raw(Some(value)) {
                Prediction::Invalid(raw) => warn!("Backend reported out-of-range prediction {}", raw),
                prediction => info!("Prediction changed: {}", prediction),
            }
        }
        self.last_prediction = Some(value);
        Some(value)
    }

    fn send_if_due(&mut self, now: Instant) -> bool {
        // An attempt consumes the slot even when it fails; no retry until the next window
        if !self.limiter.try_acquire(now) {
            return false;
        }

        match self.channel.send(self.canvas.buffer()) {
            Ok(()) => {
                debug!("Sent canvas snapshot");
                true
            }
            Err(ChannelError::Busy) => {
                debug!("Backend busy, snapshot dropped");
                false
            }
            Err(e) => {
                warn!("Canvas send failed: {}", e);
                false
            }
        }
    }

    /// Erase the canvas and forget the last prediction
    ///
    /// The send timer keeps its cadence; the next scheduled send carries the
    /// blank canvas.
    pub fn clear(&mut self) {
        info!("Clearing whiteboard");
        self.canvas.clear();
        self.last_prediction = None;
    }

    /// Prediction to display
    pub fn prediction(&self) -> Prediction {
        Prediction::from_raw(self.last_prediction)
    }

    /// Raw last value reported by the channel
    pub fn last_prediction(&self) -> Option<u8> {
        self.last_prediction
    }

    /// Read-only canvas access for rendering
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Return whether the canvas changed since the last call, for texture upload
    pub fn take_canvas_dirty(&mut self) -> bool {
        self.canvas.take_dirty()
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke.state()
    }

    /// When the last send was attempted (or the session started)
    pub fn last_send(&self) -> Instant {
        self.limiter.last()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}
