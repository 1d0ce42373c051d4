//! Rolling frame-rate meter
//!
//! Keeps the timestamps of the last [`WINDOW`] frames and reports the average
//! rate across them. The host records one timestamp per rendered frame, before
//! the simulation advances.

use crate::sim::FpsSource;

/// Frames in the rolling window
pub const WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FpsMeter {
    /// Frame timestamps in milliseconds (ring buffer)
    frame_times: [f64; WINDOW],
    frame_index: usize,
    samples: usize,
    fps: Option<f32>,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsMeter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; WINDOW],
            frame_index: 0,
            samples: 0,
            fps: None,
        }
    }

    /// Record a frame rendered at `time_ms`
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % WINDOW;
        self.samples = (self.samples + 1).min(WINDOW);

        if self.samples < 2 {
            return;
        }

        // Oldest sample still in the window
        let oldest_idx = if self.samples == WINDOW {
            self.frame_index
        } else {
            0
        };
        let elapsed = time_ms - self.frame_times[oldest_idx];
        if elapsed > 0.0 {
            let intervals = (self.samples - 1) as f64;
            self.fps = Some((intervals * 1000.0 / elapsed) as f32);
        }
    }

    /// Forget all samples (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

impl FpsSource for FpsMeter {
    fn current_fps(&self) -> Option<f32> {
        self.fps
    }
}
