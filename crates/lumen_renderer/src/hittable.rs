//! Hittable trait and HitRecord for ray-object intersection.

use lumen_math::{Interval, Position, Ray, Vec3};

use crate::material::{Material, INVALID_MATERIAL};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Whether anything was hit; every other field is meaningless when false
    pub hit: bool,
    /// Point of intersection
    pub p: Position,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            hit: false,
            p: Vec3::ZERO,
            t: 0.0,
            normal: Vec3::ZERO,
            front_face: false,
            material: &INVALID_MATERIAL,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection whose parameter lies in `ray_t` (inclusive).
    ///
    /// Returns an empty record (`hit == false`) on a miss.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> HitRecord<'a>;
}
