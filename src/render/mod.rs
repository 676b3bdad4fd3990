//! Drawing the particle field onto a 2D surface.
//!
//! The field only talks to a small canvas-like trait, so it can be drawn by a
//! real host (see [`plugin`]) or captured by [`RecordingSurface`] in tests.

mod plugin;
mod recording;

pub use plugin::{FieldHost, GlyphSlot, ParticleFieldPlugin};
pub use recording::{DrawCommand, GlyphSprite, RecordingSurface};

use crate::resources::Particle;

/// Immediate-mode 2D raster surface, modeled on a canvas context.
///
/// Coordinates are in surface pixels with the origin at the top-left corner.
/// `save`/`restore` push and pop the transient state (transform, alpha, font
/// size).
pub trait DrawingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f32);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn set_font_size(&mut self, size: f32);
    /// Draw `text` centered on the current origin.
    fn fill_text_centered(&mut self, text: &str);
}

/// Fade-in/fade-out ramp for a particle's life, in `[0, 1]`.
///
/// Rises linearly over the first `fade_ticks` ticks, holds at 1, then falls
/// linearly to 0 over the last `fade_ticks` ticks before `lifespan`.
pub fn opacity(age: u32, lifespan: u32, fade_ticks: u32) -> f32 {
    let fade = fade_ticks.max(1) as f32;
    let fade_in = (age as f32 / fade).min(1.0);
    let fade_out = ((lifespan as f32 - age as f32) / fade).min(1.0);
    (fade_in * fade_out).clamp(0.0, 1.0)
}

/// Draw one particle, leaving the surface state as it found it.
pub fn draw_particle<S: DrawingSurface + ?Sized>(surface: &mut S, p: &Particle, glyph: &str, alpha: f32) {
    surface.save();
    surface.set_global_alpha(alpha);
    surface.translate(p.pos[0], p.pos[1]);
    surface.rotate(p.rotation);
    surface.set_font_size(p.size);
    surface.fill_text_centered(glyph);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: u32 = 30;

    #[test]
    fn opacity_ramps_in_and_out() {
        let lifespan = 200;
        assert_eq!(opacity(0, lifespan, FADE), 0.0);

        let early = opacity(15, lifespan, FADE);
        assert!(early > 0.0 && early < 1.0);
        assert!(opacity(16, lifespan, FADE) > early);

        assert_eq!(opacity(100, lifespan, FADE), 1.0);
        assert!(opacity(185, lifespan, FADE) < 1.0);
        assert_eq!(opacity(lifespan, lifespan, FADE), 0.0);
    }

    #[test]
    fn opacity_clamps_past_lifespan() {
        assert_eq!(opacity(201, 200, FADE), 0.0);
    }

    #[test]
    fn short_life_never_reaches_full_opacity() {
        // 40 ticks: the two ramps overlap
        let peak = (0..=40).map(|age| opacity(age, 40, FADE)).fold(0.0, f32::max);
        assert!(peak < 1.0);
    }

    #[test]
    fn draw_particle_is_balanced() {
        let mut surface = RecordingSurface::new();
        let mut p = Particle::new([120.0, 45.0], [0.0, -1.0], 200);
        p.rotation = 0.5;
        p.size = 20.0;

        draw_particle(&mut surface, &p, "⭐", 0.25);

        let commands = surface.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Save));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.global_alpha(), 1.0);

        let sprite = &surface.sprites()[0];
        assert_eq!(sprite.glyph, "⭐");
        assert_eq!(sprite.alpha, 0.25);
        assert_eq!(sprite.size, 20.0);
        assert!((sprite.pos[0] - 120.0).abs() < 1e-4);
        assert!((sprite.pos[1] - 45.0).abs() < 1e-4);
        assert!((sprite.rotation - 0.5).abs() < 1e-5);
    }
}
