//! Whiteboard session - per-frame orchestration
//!
//! [`SessionController`] owns the canvas, the stroke state machine, the
//! backend channel, the send rate limiter and the last prediction. The host
//! calls [`SessionController::on_frame`] once per rendered frame.

mod controller;
mod prediction;
mod rate_limit;

pub use controller::{FrameReport, SessionController};
pub use prediction::Prediction;
pub use rate_limit::RateLimiter;
