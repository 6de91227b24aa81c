//! Vector algebra on top of `glam::Vec3`.
//!
//! Positions, directions and colors all share the same representation. The
//! operations glam does not provide (or provides with different semantics)
//! live on [`VectorExt`].

use glam::Vec3;
use rand::RngCore;

use crate::random::interval_random;

/// A point in world space.
pub type Position = Vec3;
/// A direction in world space, not necessarily of any particular length.
pub type Direction = Vec3;
/// A linear RGB color, components nominally in `[0, 1]`.
pub type Color = Vec3;

/// Extra vector operations used by the renderer.
pub trait VectorExt: Sized {
    /// Divide every component by the largest absolute component.
    ///
    /// This is a max-component (L∞) normalisation, not a Euclidean one: the
    /// result has at least one component of magnitude exactly 1. A zero
    /// vector yields NaN components.
    fn normalize_max(self) -> Self;

    /// Raise every component to the same power.
    fn exponentiate(self, exponent: f32) -> Self;

    /// Raise every component to the matching component of `exponent`.
    fn exponentiate_by(self, exponent: Self) -> Self;

    /// Component-wise `1 / x`.
    fn reciprocate(self) -> Self;

    /// A vector with every component drawn uniformly from `[minimum, maximum)`.
    fn random_in(rng: &mut dyn RngCore, minimum: f32, maximum: f32) -> Self;

    /// A random vector passed through [`VectorExt::normalize_max`].
    ///
    /// Uniform in the cube then projected onto its surface, so directions are
    /// biased towards the cube's corners rather than uniform on a sphere.
    fn unit_random(rng: &mut dyn RngCore, minimum: f32, maximum: f32) -> Self;
}

impl VectorExt for Vec3 {
    #[inline]
    fn normalize_max(self) -> Self {
        let max = self.x.abs().max(self.y.abs()).max(self.z.abs());
        self / max
    }

    #[inline]
    fn exponentiate(self, exponent: f32) -> Self {
        self.powf(exponent)
    }

    #[inline]
    fn exponentiate_by(self, exponent: Self) -> Self {
        Vec3::new(
            self.x.powf(exponent.x),
            self.y.powf(exponent.y),
            self.z.powf(exponent.z),
        )
    }

    #[inline]
    fn reciprocate(self) -> Self {
        self.recip()
    }

    fn random_in(rng: &mut dyn RngCore, minimum: f32, maximum: f32) -> Self {
        Vec3::new(
            interval_random(rng, minimum, maximum),
            interval_random(rng, minimum, maximum),
            interval_random(rng, minimum, maximum),
        )
    }

    fn unit_random(rng: &mut dyn RngCore, minimum: f32, maximum: f32) -> Self {
        Self::random_in(rng, minimum, maximum).normalize_max()
    }
}
