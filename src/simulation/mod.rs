//! Simulation module - the floating glyph field and its update step.
//!
//! The field owns a fixed pool of particles. The host drives it: one
//! [`ParticleField::tick`] per display frame, [`ParticleField::resize`] on
//! viewport changes, and [`ParticleField::advance_time`] so pending resizes
//! settle after their quiet window.

mod debounce;
mod field_config;
mod spawn;

use std::time::Duration;

use bevy::log::{debug, info};
use rand::Rng;

pub use debounce::ResizeDebounce;
pub use field_config::{FieldConfig, DESKTOP_POOL_SIZE, MOBILE_BREAKPOINT, MOBILE_POOL_SIZE};
pub use spawn::{respawn, spawn_mid_life};

use crate::error::ConfigError;
use crate::render::{draw_particle, opacity, DrawingSurface};
use crate::resources::Particle;

/// Ticks between heartbeat log lines.
const HEARTBEAT_TICKS: u64 = 600;

/// Pool size for a surface of the given width, using the default breakpoint.
pub fn pool_size_for_width(width: f32) -> usize {
    FieldConfig::default().pool_size_for_width(width)
}

/// Running totals since the field was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldStats {
    pub ticks: u64,
    pub respawns: u64,
    pub resizes: u64,
}

/// Fixed pool of floating glyphs.
///
/// `R` is the random source used for every spawn; pass a seeded generator
/// for reproducible runs.
#[derive(Debug)]
pub struct ParticleField<R> {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: [f32; 2],
    pending_resize: ResizeDebounce,
    rng: R,
    stats: FieldStats,
}

impl<R: Rng> ParticleField<R> {
    /// Build a field of `pool_size` particles with the default configuration.
    pub fn initialize(pool_size: usize, width: f32, height: f32, rng: R) -> Self {
        Self::build(FieldConfig::default(), pool_size, [width, height], rng)
    }

    /// Build a field with a custom configuration.
    pub fn with_config(
        config: FieldConfig,
        pool_size: usize,
        width: f32,
        height: f32,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, pool_size, [width, height], rng))
    }

    /// Build a field sized for a viewport: the pool size follows the width.
    pub fn for_viewport(config: FieldConfig, width: f32, height: f32, rng: R) -> Result<Self, ConfigError> {
        let pool_size = config.pool_size_for_width(width);
        Self::with_config(config, pool_size, width, height, rng)
    }

    fn build(config: FieldConfig, pool_size: usize, bounds: [f32; 2], mut rng: R) -> Self {
        let particles = (0..pool_size)
            .map(|_| spawn_mid_life(&config, bounds, &mut rng))
            .collect();

        info!(
            "Particle field: {} glyphs on a {}x{} surface",
            pool_size, bounds[0], bounds[1]
        );

        Self {
            pending_resize: ResizeDebounce::new(config.resize_debounce),
            config,
            particles,
            bounds,
            rng,
            stats: FieldStats::default(),
        }
    }

    /// Advance one step and draw the result.
    pub fn tick<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) {
        self.update();
        self.draw(surface);
    }

    /// Advance every particle by one step, respawning the ones that are done.
    pub fn update(&mut self) {
        let Self {
            config,
            particles,
            bounds,
            rng,
            stats,
            ..
        } = self;

        for p in particles.iter_mut() {
            p.wobble += p.wobble_speed;
            p.pos[0] += p.vel[0] + p.wobble.sin() * config.wobble_amplitude;
            p.pos[1] += p.vel[1];
            p.rotation += p.rot_speed;
            p.age += 1;

            if p.pos[1] < config.offscreen_threshold || p.age > p.lifespan {
                respawn(p, config, *bounds, rng);
                stats.respawns += 1;
            }
        }

        stats.ticks += 1;
        if stats.ticks % HEARTBEAT_TICKS == 0 {
            info!(
                "Tick {}: {} glyphs, {} respawns so far",
                stats.ticks,
                particles.len(),
                stats.respawns
            );
        }
    }

    /// Clear the surface and draw every particle with its faded alpha.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let [width, height] = self.bounds;
        surface.clear_rect(0.0, 0.0, width, height);

        for p in &self.particles {
            let alpha = opacity(p.age, p.lifespan, self.config.fade_ticks) * self.config.dimming;
            let glyph = self.config.glyphs.get(p.glyph).copied().unwrap_or_default();
            draw_particle(surface, p, glyph, alpha);
        }
    }

    /// Request new surface bounds.
    ///
    /// Applied once the configured quiet window passes with no newer request.
    /// Existing particles keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pending_resize.request(width, height);
    }

    /// Let `dt` of wall time pass. Returns true when a pending resize was applied.
    pub fn advance_time(&mut self, dt: Duration) -> bool {
        match self.pending_resize.advance(dt) {
            Some(bounds) => {
                debug!("Particle field resized to {}x{}", bounds[0], bounds[1]);
                self.bounds = bounds;
                self.stats.resizes += 1;
                true
            }
            None => false,
        }
    }

    /// Force an immediate respawn of one particle. Out-of-range indices are ignored.
    pub fn respawn_particle(&mut self, index: usize) {
        if let Some(p) = self.particles.get_mut(index) {
            respawn(p, &self.config, self.bounds, &mut self.rng);
            self.stats.respawns += 1;
        }
    }
}

impl<R> ParticleField<R> {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the pool. The pool itself can't grow or shrink.
    ///
    /// Writes go straight to the particles and skip the spawn policy, so the
    /// caller is responsible for keeping `vel[1] < 0` and `age <= lifespan`.
    /// Meant for pinning particle state in tests and tooling.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pool_size(&self) -> usize {
        self.particles.len()
    }

    /// Current surface bounds (width, height).
    pub fn bounds(&self) -> [f32; 2] {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn resize_pending(&self) -> bool {
        self.pending_resize.is_pending()
    }
}
