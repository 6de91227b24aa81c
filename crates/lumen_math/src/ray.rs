use crate::{Direction, Position};

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to have any particular length; camera rays
/// use the max-component normalisation and scattered rays are left as-is.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Ray {
    pub origin: Position,
    pub direction: Direction,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Position, direction: Direction) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + direction * t
    #[inline]
    pub fn at(&self, t: f32) -> Position {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_at_matches_definition() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let origin = Vec3::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let direction = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let t: f32 = rng.gen_range(-100.0..100.0);
            let ray = Ray::new(origin, direction);
            assert_eq!(ray.at(t), origin + direction * t);
        }
    }

    #[test]
    fn test_default_ray_is_zero() {
        let ray = Ray::default();
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert_eq!(ray.direction(), Vec3::ZERO);
    }
}
