//! The entity collection rendered by each worker.

use lumen_math::{Interval, Ray};

use crate::{
    hittable::{HitRecord, Hittable},
    Entity,
};

/// An ordered list of entities, intersected by linear scan.
///
/// Built once by appending, then only read. Cloning produces an independent
/// snapshot, which is what each worker receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity.
    pub fn add(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Get the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> HitRecord<'a> {
        let mut closest = HitRecord::default();
        let mut lowest_t = f32::INFINITY;

        for entity in &self.entities {
            let rec = entity.hit(ray, ray_t);
            if rec.hit && rec.t < lowest_t {
                lowest_t = rec.t;
                closest = rec;
            }
        }

        closest
    }
}
