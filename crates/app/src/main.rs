//! Digit whiteboard - headless host
//!
//! Plays the part of a windowed front end: samples a scripted pointer once
//! per frame, drives the session, and prints the resulting canvas.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use whiteboard_canvas::{CanvasRect, StampRegion};
use whiteboard_comm::{CommunicationChannel, CyclingPredictor, StubChannel, ThreadedChannel};
use whiteboard_config::{BackendKind, WhiteboardConfig};
use whiteboard_session::SessionController;

mod gesture;
mod preview;

use gesture::ScriptedPointer;

/// On-screen canvas size in window pixels
const DISPLAY_SIZE: f32 = 448.0;

/// Idle frames after the gesture, long enough for a few more sends
const IDLE_FRAMES: usize = 45;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = WhiteboardConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    info!("Starting digit whiteboard with {:?} backend", config.backend);

    let channel: Box<dyn CommunicationChannel> = match config.backend {
        BackendKind::Stub => Box::new(StubChannel::new()),
        BackendKind::Threaded => Box::new(
            ThreadedChannel::spawn(CyclingPredictor::default())
                .context("Failed to start prediction backend")?,
        ),
    };

    let mut session = SessionController::new(channel, &config);

    let rect = CanvasRect::new(Vec2::new(32.0, 32.0), Vec2::splat(DISPLAY_SIZE));
    let pointer = ScriptedPointer::seven(rect, IDLE_FRAMES);
    let frame_duration = config.frame_duration();
    info!("Replaying {} frames at {} fps", pointer.len(), config.frame_rate);

    let mut next_frame = Instant::now();
    let mut uploads = 0usize;
    let mut sends = 0usize;
    let mut inked: Option<StampRegion> = None;

    for sample in pointer {
        let input = rect.pointer_input(sample.position, sample.pressed, sample.released);
        let report = session.on_frame(&input);

        if let Some(stamp) = report.stamp {
            inked = Some(inked.map_or(stamp, |region| region.union(stamp)));
        }
        if report.sent {
            sends += 1;
        }
        if session.take_canvas_dirty() {
            uploads += 1;
        }

        next_frame += frame_duration;
        if let Some(wait) = next_frame.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
    }

    debug!("Canvas changed on {} frames", uploads);
    if let Some(region) = inked {
        debug!(
            "Inked region ({}, {}) {}x{}",
            region.x, region.y, region.width, region.height
        );
    }
    info!("Sent {} snapshots", sends);

    print!("{}", preview::render(session.canvas()));
    println!("Prediction: {}", session.prediction());

    Ok(())
}
