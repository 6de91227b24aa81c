//! Colour-space conversion and the pixel sink the orchestrator draws into.

use std::path::Path;
use std::time::Duration;

use image::{ColorType, ImageFormat, ImageResult};
use lumen_math::Color;

/// Convert one linear channel to sRGB in `[0, 1]` for inputs in `[0, 1]`.
pub fn linear_value_to_srgb(value: f32) -> f32 {
    if value <= 0.003_130_8 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert a linear colour to sRGB, channel-wise.
pub fn linear_to_srgb(color: Color) -> Color {
    Color::new(
        linear_value_to_srgb(color.x),
        linear_value_to_srgb(color.y),
        linear_value_to_srgb(color.z),
    )
}

/// Destination of a render session.
///
/// Colours passed to [`PixelSink::set_pixel`] are already in sRGB scaled to
/// `[0, 255]`, with coordinates inside the render's canvas. A sink smaller
/// than the canvas must drop writes it cannot hold. Nothing is presented
/// until [`PixelSink::commit`].
pub trait PixelSink {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);
    fn update_progress(&mut self, fraction: f64);
    fn update_elapsed_time(&mut self, elapsed: Duration);
    fn commit(&mut self);
}

/// In-memory RGBA8 canvas.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    progress: f64,
    elapsed: Duration,
    commits: usize,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; width as usize * height as usize],
            progress: 0.0,
            elapsed: Duration::ZERO,
            commits: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[self.offset(x, y)]
    }

    /// Last reported progress fraction.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Last reported time since the render started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of times the frame was committed.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Convert to RGBA bytes.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Write the frame as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        image::save_buffer_with_format(
            path,
            &self.to_rgba(),
            self.width,
            self.height,
            ColorType::Rgba8,
            ImageFormat::Png,
        )
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn to_byte(channel: f32) -> u8 {
    // NaN maps to 0
    channel.clamp(0.0, 255.0).round() as u8
}

impl PixelSink for FrameBuffer {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = self.offset(x, y);
        self.pixels[offset] = [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255];
    }

    fn update_progress(&mut self, fraction: f64) {
        self.progress = fraction;
    }

    fn update_elapsed_time(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    fn commit(&mut self) {
        self.commits += 1;
    }
}
