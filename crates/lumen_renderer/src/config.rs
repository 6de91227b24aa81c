//! Render configuration, fixed for the length of a render session.

use lumen_core::RenderSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration cannot be rendered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("samples_per_pixel must be at least 1")]
    NoSamples,

    #[error("threads must be at least 1")]
    NoThreads,

    #[error("canvas must not be empty (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("cannot split {height} rows between {threads} workers")]
    TooManyThreads { threads: usize, height: u32 },
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of the canvas and the image in pixels
    pub canvas_width: u32,
    /// Height of the canvas and the image in pixels
    pub canvas_height: u32,
    /// Maximum number of times a ray is traced before it returns black
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing, at least 1
    pub samples_per_pixel: u32,
    /// Viewport height in world units; the width follows the canvas aspect ratio
    pub viewport_height: f32,
    /// Number of workers to dispatch
    pub threads: usize,
    /// Base seed for reproducible renders; each worker adds its index
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 640,
            canvas_height: 360,
            max_depth: 50,
            samples_per_pixel: 100,
            viewport_height: 2.0,
            threads: 3,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Viewport width in world units.
    pub fn viewport_width(&self) -> f32 {
        self.canvas_width as f32 / self.canvas_height as f32 * self.viewport_height
    }

    /// Total number of pixels on the canvas.
    pub fn pixel_count(&self) -> usize {
        self.canvas_width as usize * self.canvas_height as usize
    }

    /// Return a copy with every field present in `settings` replaced.
    pub fn with_settings(mut self, settings: &RenderSettings) -> Self {
        if let Some(width) = settings.canvas_width {
            self.canvas_width = width;
        }
        if let Some(height) = settings.canvas_height {
            self.canvas_height = height;
        }
        if let Some(depth) = settings.max_depth {
            self.max_depth = depth;
        }
        if let Some(samples) = settings.samples_per_pixel {
            self.samples_per_pixel = samples;
        }
        if let Some(viewport_height) = settings.viewport_height {
            self.viewport_height = viewport_height;
        }
        if let Some(threads) = settings.threads {
            self.threads = threads;
        }
        if settings.seed.is_some() {
            self.seed = settings.seed;
        }
        self
    }

    /// Check the configuration can be rendered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.threads > self.canvas_height as usize {
            return Err(ConfigError::TooManyThreads {
                threads: self.threads,
                height: self.canvas_height,
            });
        }
        Ok(())
    }
}
