//! Backend running on its own worker thread
//!
//! Snapshots travel to the worker through a queue holding a single pending
//! request; predictions come back through a small result queue. The caller
//! only ever uses the non-blocking ends of both queues.

use std::thread;

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tracing::{debug, info};
use whiteboard_canvas::Buffer;

use crate::{ChannelError, CommunicationChannel};

/// Pending snapshots allowed in flight to the worker
const REQUEST_CAPACITY: usize = 1;

/// Predictions the worker may queue before it waits for the caller
const RESULT_CAPACITY: usize = 4;

/// A digit predictor driven by [`ThreadedChannel`]
pub trait Predictor: Send + 'static {
    /// Predict the digit drawn in `pixels`
    fn predict(&mut self, pixels: &Buffer) -> u8;
}

/// Predictor with stub semantics: cycles 0..=9 per call, ignores pixels
#[derive(Debug, Default)]
pub struct CyclingPredictor {
    counter: u8,
}

impl Predictor for CyclingPredictor {
    fn predict(&mut self, _pixels: &Buffer) -> u8 {
        self.counter = (self.counter + 1) % 10;
        self.counter
    }
}

/// Channel whose backend runs a [`Predictor`] on a dedicated thread
///
/// The worker is detached. Dropping the channel closes both queues and
/// returns immediately; a `predict` call already running finishes on the
/// worker, which then exits without delivering its result.
pub struct ThreadedChannel {
    /// Request sender, taken on drop to stop the worker
    requests: Option<mpsc::Sender<Box<Buffer>>>,
    results: mpsc::Receiver<u8>,
}

impl ThreadedChannel {
    /// Start a worker thread running `predictor`
    pub fn spawn<P: Predictor>(mut predictor: P) -> Result<Self, ChannelError> {
        let (request_tx, mut request_rx) = mpsc::channel::<Box<Buffer>>(REQUEST_CAPACITY);
        let (result_tx, result_rx) = mpsc::channel::<u8>(RESULT_CAPACITY);

        thread::Builder::new()
            .name("whiteboard-backend".into())
            .spawn(move || {
                info!("Prediction worker started");
                while let Some(pixels) = request_rx.blocking_recv() {
                    let digit = predictor.predict(&pixels);
                    debug!("Prediction worker: predicted {}", digit);
                    if result_tx.blocking_send(digit).is_err() {
                        break;
                    }
                }
                info!("Prediction worker stopped");
            })?;

        Ok(Self {
            requests: Some(request_tx),
            results: result_rx,
        })
    }
}

impl CommunicationChannel for ThreadedChannel {
    fn send(&mut self, buffer: &Buffer) -> Result<(), ChannelError> {
        let Some(requests) = self.requests.as_ref() else {
            return Err(ChannelError::Disconnected);
        };

        requests
            .try_send(Box::new(*buffer))
            .map_err(|e| match e {
                TrySendError::Full(_) => ChannelError::Busy,
                TrySendError::Closed(_) => ChannelError::Disconnected,
            })
    }

    fn recv(&mut self) -> Result<Option<u8>, ChannelError> {
        match self.results.try_recv() {
            Ok(digit) => Ok(Some(digit)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ChannelError::Disconnected),
        }
    }
}

impl Drop for ThreadedChannel {
    fn drop(&mut self) {
        // Close results first so a worker blocked on a full result queue wakes up
        self.results.close();
        self.requests.take();
        debug!("Prediction worker detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc as std_mpsc;
    use std::time::{Duration, Instant};
    use whiteboard_canvas::PIXEL_COUNT;

    /// Poll until a prediction arrives or a second passes
    fn recv_within(channel: &mut ThreadedChannel) -> Option<u8> {
        let deadline = Instant::now() + Duration::from_secs(1);
        while Instant::now() < deadline {
            if let Some(digit) = channel.recv().unwrap() {
                return Some(digit);
            }
            thread::sleep(Duration::from_millis(1));
        }
        None
    }

    /// Predictor that reports when it starts and waits for permission to finish
    struct GatedPredictor {
        started: std_mpsc::Sender<()>,
        gate: std_mpsc::Receiver<()>,
    }

    impl Predictor for GatedPredictor {
        fn predict(&mut self, pixels: &Buffer) -> u8 {
            let _ = self.started.send(());
            let _ = self.gate.recv();
            pixels[0] % 10
        }
    }

    #[test]
    fn test_threaded_round_trip() {
        let mut channel = ThreadedChannel::spawn(CyclingPredictor::default()).unwrap();
        assert_eq!(channel.recv().unwrap(), None);

        channel.send(&[0u8; PIXEL_COUNT]).unwrap();
        assert_eq!(recv_within(&mut channel), Some(1));

        channel.send(&[0u8; PIXEL_COUNT]).unwrap();
        assert_eq!(recv_within(&mut channel), Some(2));
    }

    #[test]
    fn test_threaded_busy_when_request_pending() {
        let (started_tx, started_rx) = std_mpsc::channel();
        let (gate_tx, gate_rx) = std_mpsc::channel();
        let mut channel = ThreadedChannel::spawn(GatedPredictor {
            started: started_tx,
            gate: gate_rx,
        })
        .unwrap();

        let mut first = [0u8; PIXEL_COUNT];
        first[0] = 3;
        let mut second = [0u8; PIXEL_COUNT];
        second[0] = 7;

        // Worker picks up the first snapshot and blocks in predict
        channel.send(&first).unwrap();
        started_rx.recv_timeout(Duration::from_secs(1)).unwrap();

        // One more fits in the queue, the next is dropped
        channel.send(&second).unwrap();
        assert!(matches!(channel.send(&second), Err(ChannelError::Busy)));

        // Nothing is ready while the worker is gated
        assert_eq!(channel.recv().unwrap(), None);

        gate_tx.send(()).unwrap();
        assert_eq!(recv_within(&mut channel), Some(3));

        started_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        gate_tx.send(()).unwrap();
        assert_eq!(recv_within(&mut channel), Some(7));
    }

    /// Predictor whose sender hangs up once the worker exits and drops it
    struct WatchedPredictor {
        _alive: std_mpsc::Sender<()>,
    }

    impl Predictor for WatchedPredictor {
        fn predict(&mut self, _pixels: &Buffer) -> u8 {
            0
        }
    }

    #[test]
    fn test_threaded_drop_stops_worker() {
        let (alive_tx, alive_rx) = std_mpsc::channel::<()>();
        let mut channel = ThreadedChannel::spawn(WatchedPredictor { _alive: alive_tx }).unwrap();
        channel.send(&[0u8; PIXEL_COUNT]).unwrap();

        drop(channel);
        assert_eq!(
            alive_rx.recv_timeout(Duration::from_secs(1)),
            Err(std_mpsc::RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn test_threaded_drop_does_not_wait_for_predict() {
        let (started_tx, started_rx) = std_mpsc::channel();
        let (gate_tx, gate_rx) = std_mpsc::channel();
        let mut channel = ThreadedChannel::spawn(GatedPredictor {
            started: started_tx,
            gate: gate_rx,
        })
        .unwrap();

        channel.send(&[0u8; PIXEL_COUNT]).unwrap();
        started_rx.recv_timeout(Duration::from_secs(1)).unwrap();

        // Worker is stuck in predict; dropping must not block on it
        let before = Instant::now();
        drop(channel);
        assert!(before.elapsed() < Duration::from_millis(500));

        // Once released, the worker finds the result queue closed and exits
        gate_tx.send(()).unwrap();
        assert_eq!(
            started_rx.recv_timeout(Duration::from_secs(1)),
            Err(std_mpsc::RecvTimeoutError::Disconnected)
        );
    }
}
