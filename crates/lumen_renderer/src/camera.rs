//! Camera for ray generation.
//!
//! A pinhole at a fixed position looking through a viewport plane at
//! `z = -1`. The viewport is centred on the z axis; its height comes from the
//! config and its width from the canvas aspect ratio.

use lumen_math::{interval_random, Position, Ray, Vec3, VectorExt};
use rand::RngCore;

use crate::RenderConfig;

/// Fraction of a pixel the sample jitter reaches in each direction.
pub const SAMPLE_JITTER: f32 = 1.0 / 3.0;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Position,
    viewport_start: Position,
    delta_width: Vec3,
    delta_height: Vec3,
}

impl Camera {
    /// Create a camera for the given canvas and viewport configuration.
    pub fn new(position: Position, config: &RenderConfig) -> Self {
        let viewport_width = config.viewport_width();
        let viewport_height = config.viewport_height;

        Self {
            position,
            viewport_start: Vec3::new(-viewport_width / 2.0, viewport_height / 2.0, -1.0),
            delta_width: Vec3::new(viewport_width / config.canvas_width as f32, 0.0, 0.0),
            delta_height: Vec3::new(0.0, -viewport_height / config.canvas_height as f32, 0.0),
        }
    }

    /// Viewport point of pixel (x, y) before jitter.
    pub fn viewport_point(&self, x: u32, y: u32) -> Position {
        self.viewport_start + self.delta_height * y as f32 + self.delta_width * x as f32
    }

    /// Generate a ray for pixel (x, y) with random sampling.
    ///
    /// The direction is normalised by its largest component.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let sample_dx = interval_random(rng, -SAMPLE_JITTER, SAMPLE_JITTER);
        let sample_dy = interval_random(rng, -SAMPLE_JITTER, SAMPLE_JITTER);
        let offset = self.delta_width * sample_dx + self.delta_height * sample_dy;

        let sample_point = self.viewport_point(x, y) + offset;
        Ray::new(self.position, (sample_point - self.position).normalize_max())
    }
}
