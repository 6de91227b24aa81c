//! Random number and rounding helpers shared by the sampler and display code.

use rand::{Rng, RngCore};

/// Draw a float uniformly from `[0, 1)`.
#[inline]
fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Draw a float uniformly from `[minimum, maximum)`.
#[inline]
pub fn interval_random(rng: &mut dyn RngCore, minimum: f32, maximum: f32) -> f32 {
    minimum + gen_f32(rng) * (maximum - minimum)
}

/// Round `value` up to the next multiple of `nearest`.
pub fn round_up(value: f64, nearest: f64) -> f64 {
    (value / nearest).ceil() * nearest
}

/// Truncate `value` to `1 / place` precision, e.g. `place = 100000` keeps five decimals.
pub fn round_down_to_place(value: f64, place: f64) -> f64 {
    (value * place).floor() / place
}
