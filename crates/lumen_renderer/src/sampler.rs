//! Monte Carlo path tracing sampler.
//!
//! Implements the per-pixel estimator with:
//! - Recursive ray tracing with a hard bounce cap
//! - Anti-aliasing via jittered multi-sampling
//! - A vertical sky gradient as the only light source

use lumen_math::{Color, Interval, Ray};
use rand::RngCore;

use crate::{Camera, Hittable, RenderConfig};

/// Smallest accepted hit parameter, keeps scattered rays off their own surface.
pub const T_MIN: f32 = 0.001;
/// Largest accepted hit parameter (2^53 - 1).
pub const T_MAX: f32 = 9_007_199_254_740_991.0;

const SKY_ZENITH: Color = Color::new(1.0, 1.0, 1.0);
const SKY_HORIZON: Color = Color::new(0.5, 0.7, 1.0);

/// Compute the color seen by a ray.
///
/// Returns black once `depth` reaches zero, whatever the scene contains.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let rec = world.hit(ray, Interval::new(T_MIN, T_MAX));
    if !rec.hit {
        return sky_gradient(ray);
    }

    let scatter = rec.material.scatter(ray, &rec, rng);
    if scatter.scattered {
        ray_color(&scatter.scattered_ray, world, depth - 1, rng) * scatter.attenuation
    } else {
        Color::ZERO
    }
}

/// Compute sky gradient background.
///
/// Uses the direction's y component as-is; directions are not renormalised.
pub fn sky_gradient(ray: &Ray) -> Color {
    let a = (ray.direction().y + 1.0) * 0.5;
    SKY_ZENITH * (1.0 - a) + SKY_HORIZON * a
}

/// Render a single pixel with multi-sampling.
///
/// `on_sample` runs after every sample, which is where workers check whether
/// a progress report is due.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    on_sample: &mut dyn FnMut(),
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
        on_sample();
    }

    // Average the samples
    pixel_color * (1.0 / config.samples_per_pixel as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Entity, Material, Scene, Sphere};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pink_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -4.0),
            2.0,
            Material::diffuse(Color::new(1.0, 0.5, 0.5)),
        ));
        scene
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(up, SKY_HORIZON);

        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        assert_eq!(down, SKY_ZENITH);

        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        assert!(level.abs_diff_eq(Color::new(0.75, 0.85, 1.0), 1e-6));
    }

    #[test]
    fn test_miss_returns_sky_not_black() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        let color = ray_color(&ray, &scene, 5, &mut rng);
        assert_eq!(color, SKY_HORIZON);
    }

    #[test]
    fn test_depth_zero_is_black() {
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray_color(&ray, &Scene::new(), 0, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&ray, &pink_sphere_scene(), 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_single_trace_on_hit_is_black() {
        // The scattered ray is traced with depth 0 and contributes nothing
        let mut rng = StdRng::seed_from_u64(2);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &pink_sphere_scene(), 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_one_bounce_is_attenuated_sky() {
        let scene = pink_sphere_scene();
        let mut rng = StdRng::seed_from_u64(3);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for _ in 0..200 {
            let color = ray_color(&ray, &scene, 2, &mut rng);
            // color ⊙ sky, with sky between the horizon and zenith colors
            assert!(color.x >= 0.5 - 1e-4 && color.x <= 1.0 + 1e-4, "{:?}", color);
            assert!(color.y >= 0.35 - 1e-4 && color.y <= 0.5 + 1e-4, "{:?}", color);
            assert!((color.z - 0.5).abs() < 1e-4, "{:?}", color);
        }
    }

    #[test]
    fn test_invalid_material_absorbs() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 2.0, Material::Invalid));
        scene.add(Entity::Invalid);
        let mut rng = StdRng::seed_from_u64(4);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert_eq!(ray_color(&ray, &scene, 10, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_render_pixel_counts_samples() {
        let scene = pink_sphere_scene();
        let config = RenderConfig {
            samples_per_pixel: 7,
            max_depth: 2,
            ..Default::default()
        };
        let camera = Camera::new(Vec3::ZERO, &config);
        let mut rng = StdRng::seed_from_u64(5);
        let mut samples = 0;

        let color = render_pixel(&camera, &scene, 320, 180, &config, &mut rng, &mut || samples += 1);

        assert_eq!(samples, 7);
        assert!(color.x >= 0.5 - 1e-3 && color.x <= 1.0 + 1e-3, "{:?}", color);
    }

    #[test]
    fn test_render_pixel_sky_corner() {
        // Top-left pixel of an empty scene looks at the sky
        let config = RenderConfig {
            samples_per_pixel: 4,
            ..Default::default()
        };
        let camera = Camera::new(Vec3::ZERO, &config);
        let mut rng = StdRng::seed_from_u64(6);

        let color = render_pixel(&camera, &Scene::new(), 0, 0, &config, &mut rng, &mut || {});
        assert!((color.z - 1.0).abs() < 1e-5);
        assert!(color.x < 1.0 && color.x >= 0.5);
    }
}
