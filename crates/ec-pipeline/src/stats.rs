//! Frame-rate and per-frame statistics for host overlays and tooling.

use std::time::{Duration, Instant};

use ec_core::FrameView;
use serde::Serialize;

use crate::mode::ProcessingMode;

const WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second over windows of at least one second.
///
/// Callers pass the frame timestamp, so the counter never reads the clock.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<Instant>,
    fps: Option<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame at `now`.
    ///
    /// Publishes a new rate when the current window reaches one second and
    /// returns the latest published rate, or `None` before the first window
    /// closes.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed >= WINDOW {
            self.fps = Some(f64::from(self.frames) / elapsed.as_secs_f64());
            self.frames = 0;
            self.window_start = Some(now);
        }

        self.fps
    }

    pub fn fps(&self) -> Option<f64> {
        self.fps
    }
}

/// Summary of one processed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub width: usize,
    pub height: usize,
    pub mode: ProcessingMode,
    pub fps: Option<f64>,
    /// Edge pixels in the output; only set for `EdgeDetect`.
    pub edge_pixels: Option<usize>,
}

impl FrameStats {
    pub fn from_output(mode: ProcessingMode, output: &FrameView<'_>, fps: Option<f64>) -> Self {
        let edge_pixels = (mode == ProcessingMode::EdgeDetect)
            .then(|| output.pixels().filter(|px| px[0] == ec_edge::EDGE).count());

        Self {
            width: output.width(),
            height: output.height(),
            mode,
            fps,
            edge_pixels,
        }
    }
}
