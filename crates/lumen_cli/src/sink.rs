//! Pixel sink that reports progress through the log.

use std::time::Duration;

use log::info;
use lumen_math::{round_down_to_place, Color};
use lumen_renderer::{FrameBuffer, PixelSink};

/// Five decimal places.
const PROGRESS_PLACE: f64 = 100_000.0;

/// Wraps a [`FrameBuffer`], logging each display update.
pub struct LoggingSink {
    frame: FrameBuffer,
}

impl LoggingSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self { frame: FrameBuffer::new(width, height) }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl PixelSink for LoggingSink {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.frame.set_pixel(x, y, color);
    }

    fn update_progress(&mut self, fraction: f64) {
        info!("Progress: {}", round_down_to_place(fraction, PROGRESS_PLACE));
        self.frame.update_progress(fraction);
    }

    fn update_elapsed_time(&mut self, elapsed: Duration) {
        info!("Time since start in milliseconds: {}", elapsed.as_millis());
        self.frame.update_elapsed_time(elapsed);
    }

    fn commit(&mut self) {
        self.frame.commit();
    }
}
