//! Prediction backend channel for the digit whiteboard
//!
//! The session talks to a backend only through [`CommunicationChannel`]:
//! canvas snapshots go out with `send`, predicted digits come back from
//! `recv`. Both calls must return immediately.

mod stub;
mod threaded;

pub use stub::StubChannel;
pub use threaded::{CyclingPredictor, Predictor, ThreadedChannel};

use thiserror::Error;
use whiteboard_canvas::Buffer;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Backend busy: previous snapshot still pending")]
    Busy,

    #[error("Backend disconnected")]
    Disconnected,

    #[error("Failed to start backend worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Trait for prediction backends
///
/// Implementations that do real work elsewhere (another thread, a socket)
/// own all of their synchronization and must never block the caller.
pub trait CommunicationChannel {
    /// Hand a canvas snapshot to the backend (fire-and-forget)
    fn send(&mut self, buffer: &Buffer) -> Result<(), ChannelError>;

    /// Poll for at most one pending prediction without waiting
    fn recv(&mut self) -> Result<Option<u8>, ChannelError>;
}

impl<C: CommunicationChannel + ?Sized> CommunicationChannel for Box<C> {
    fn send(&mut self, buffer: &Buffer) -> Result<(), ChannelError> {
        (**self).send(buffer)
    }

    fn recv(&mut self) -> Result<Option<u8>, ChannelError> {
        (**self).recv()
    }
}
