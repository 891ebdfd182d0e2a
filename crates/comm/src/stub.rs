//! Wiring test double that ignores pixel content

use tracing::trace;
use whiteboard_canvas::Buffer;

use crate::{ChannelError, CommunicationChannel};

/// Stub backend: a counter that cycles 0..=9 on every send
///
/// `recv` always reports the current counter, so a session wired to it sees
/// the "prediction" change once per transmission.
#[derive(Debug, Default)]
pub struct StubChannel {
    counter: u8,
    sent: usize,
}

impl StubChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots received so far
    pub fn sent_count(&self) -> usize {
        self.sent
    }
}

impl CommunicationChannel for StubChannel {
    fn send(&mut self, _buffer: &Buffer) -> Result<(), ChannelError> {
        self.counter = (self.counter + 1) % 10;
        self.sent += 1;
        trace!("StubChannel::send #{} -> counter {}", self.sent, self.counter);
        Ok(())
    }

    fn recv(&mut self) -> Result<Option<u8>, ChannelError> {
        Ok(Some(self.counter))
    }
}
