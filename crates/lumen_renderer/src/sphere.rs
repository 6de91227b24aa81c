//! Sphere primitive for ray tracing.

use lumen_math::{Interval, Position, Ray, VectorExt};

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Position,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be non-zero.
    pub fn new(center: Position, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> HitRecord<'a> {
        let direction = ray.direction();
        let oc = ray.origin() - self.center;
        let a = direction.dot(direction);
        let b = (direction * 2.0).dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        // A negative discriminant makes both roots NaN, which the range test rejects.
        let sqrtd = discriminant.sqrt();
        let roots = [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)];

        let mut nearest = None;
        for root in roots {
            if !ray_t.contains(root) {
                continue;
            }
            if nearest.map_or(true, |t| root < t) {
                nearest = Some(root);
            }
        }

        let Some(t) = nearest else {
            return HitRecord::default();
        };

        let p = ray.at(t);
        let outward_normal = (p - self.center).normalize_max();
        let mut rec = HitRecord {
            hit: true,
            p,
            t,
            material: &self.material,
            ..HitRecord::default()
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }
}
