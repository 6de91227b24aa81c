//! Scene entities: a closed set of geometry variants dispatched by match.

use lumen_core::EntityDesc;
use lumen_math::{Interval, Ray, Vec3};

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Sphere,
};

/// A piece of scene geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Sphere(Sphere),
    /// Null object for unrecognised scene data. Never intersects.
    Invalid,
}

impl Entity {
    /// Build an entity from its scene record.
    pub fn from_desc(desc: &EntityDesc) -> Self {
        match desc {
            EntityDesc::Sphere {
                center,
                radius,
                material,
            } if *radius != 0.0 => Entity::Sphere(Sphere::new(
                Vec3::from(*center),
                *radius,
                Material::from_desc(material),
            )),
            _ => Entity::Invalid,
        }
    }
}

impl From<Sphere> for Entity {
    fn from(sphere: Sphere) -> Self {
        Entity::Sphere(sphere)
    }
}

impl Hittable for Entity {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> HitRecord<'a> {
        match self {
            Entity::Sphere(sphere) => sphere.hit(ray, ray_t),
            Entity::Invalid => HitRecord::default(),
        }
    }
}
