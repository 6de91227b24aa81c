//! Surface scattering.

use lumen_core::MaterialDesc;
use lumen_math::{Color, Ray, Vec3, VectorExt};
use rand::RngCore;

use crate::hittable::HitRecord;

/// Shared null material, used by empty hit records.
pub static INVALID_MATERIAL: Material = Material::Invalid;

/// How a surface responds to an incoming ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Scatters towards the normal plus a random unit-cube offset.
    Diffuse { color: Color },
    /// Absorbs every ray.
    Invalid,
}

/// Result of asking a material to scatter a ray.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScatterRecord {
    /// Whether a new ray was emitted
    pub scattered: bool,
    /// Color the continuation is multiplied by
    pub attenuation: Color,
    /// The continuation ray (zero when absorbed)
    pub scattered_ray: Ray,
}

impl ScatterRecord {
    /// A successful scatter.
    pub fn new(attenuation: Color, scattered_ray: Ray) -> Self {
        Self {
            scattered: true,
            attenuation,
            scattered_ray,
        }
    }

    /// The ray was absorbed.
    pub fn absorbed() -> Self {
        Self::default()
    }
}

impl Material {
    /// Create a diffuse material with the given color.
    pub fn diffuse(color: Color) -> Self {
        Material::Diffuse { color }
    }

    /// Build a material from its scene record.
    pub fn from_desc(desc: &MaterialDesc) -> Self {
        match desc {
            MaterialDesc::Diffuse { color } => Material::diffuse(Vec3::from(*color)),
            MaterialDesc::Invalid => Material::Invalid,
        }
    }

    /// Scatter an incoming ray at a hit.
    pub fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterRecord {
        match self {
            Material::Diffuse { color } => {
                let random = Vec3::unit_random(rng, -1.0, 1.0);
                // A random vector exactly opposite the normal yields a zero direction.
                let direction = rec.normal + random;
                ScatterRecord::new(*color, Ray::new(rec.p, direction))
            }
            Material::Invalid => ScatterRecord::absorbed(),
        }
    }
}
