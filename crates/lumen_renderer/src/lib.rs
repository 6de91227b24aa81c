//! Lumen renderer - band-parallel CPU path tracing
//!
//! A Monte Carlo path tracer that splits the canvas into horizontal bands,
//! renders each band on its own worker thread and merges the results into a
//! [`PixelSink`].

mod band;
mod camera;
mod config;
mod entity;
mod framebuffer;
mod hittable;
mod material;
mod orchestrator;
mod protocol;
mod sampler;
mod scene;
mod sphere;
mod throttle;
mod worker;

pub use band::{generate_bands, Band};
pub use camera::{Camera, SAMPLE_JITTER};
pub use config::{ConfigError, RenderConfig};
pub use entity::Entity;
pub use framebuffer::{linear_to_srgb, linear_value_to_srgb, FrameBuffer, PixelSink};
pub use hittable::{HitRecord, Hittable};
pub use material::{Material, ScatterRecord, INVALID_MATERIAL};
pub use orchestrator::{RenderError, RenderStats, Renderer, DISPLAY_INTERVAL};
pub use protocol::{Preload, WorkerMessage};
pub use sampler::{ray_color, render_pixel, sky_gradient, T_MAX, T_MIN};
pub use scene::Scene;
pub use sphere::Sphere;
pub use throttle::ProgressThrottle;
pub use worker::{launch, RenderWorker, PROGRESS_INTERVAL};

/// Re-export vector types from lumen_math
pub use lumen_math::{Color, Interval, Position, Ray, Vec3};
