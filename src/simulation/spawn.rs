//! Spawn policy for floating glyphs.
//!
//! Every attribute is drawn independently from its configured range, so a
//! particle's successive lives are uncorrelated.

use std::f32::consts::TAU;

use rand::Rng;

use super::field_config::FieldConfig;
use crate::resources::Particle;

/// Reset `p` in place as a fresh particle just below the bottom edge.
pub fn respawn<R: Rng + ?Sized>(p: &mut Particle, config: &FieldConfig, bounds: [f32; 2], rng: &mut R) {
    let [width, height] = bounds;

    p.pos = [sample_extent(rng, width), height + config.spawn_offset];
    p.vel = [
        rng.gen_range(config.drift_x.clone()),
        -rng.gen_range(config.rise_speed.clone()),
    ];
    p.size = rng.gen_range(config.size.clone());
    p.age = 0;
    p.lifespan = rng.gen_range(config.lifespan.clone());
    p.glyph = rng.gen_range(0..config.glyphs.len());
    p.rotation = rng.gen_range(0.0..TAU);
    p.rot_speed = rng.gen_range(config.rot_speed.clone());
    p.wobble = rng.gen_range(0.0..TAU);
    p.wobble_speed = rng.gen_range(config.wobble_speed.clone());
}

/// A particle already part-way through its life, anywhere on the surface.
///
/// Used to fill the pool at startup so the first frame does not show every
/// particle being born at once.
pub fn spawn_mid_life<R: Rng + ?Sized>(config: &FieldConfig, bounds: [f32; 2], rng: &mut R) -> Particle {
    let mut p = Particle::new([0.0, 0.0], [0.0, 0.0], 1);
    respawn(&mut p, config, bounds, rng);
    p.pos[1] = sample_extent(rng, bounds[1]);
    p.age = rng.gen_range(0..p.lifespan);
    p
}

/// Uniform in `[0, extent)`, or 0 for a degenerate or unbounded surface.
fn sample_extent<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
