//! Plain data structures for the particle field.
//!
//! A `Particle` carries everything the update and draw steps need. It is
//! owned by the field's pool and reset in place, never reallocated.

/// Glyphs of the landing page's floating layer.
pub const GLYPHS: [&str; 9] = ["🍦", "🍧", "⭐", "✨", "🍓", "🍫", "🍬", "🌸", "💫"];

/// A single floating glyph.
///
/// Coordinates are canvas-style: origin at the top-left corner, y grows
/// downward, so rising particles have a negative vertical velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position (x, y) in surface pixels
    pub pos: [f32; 2],
    /// Velocity (vx, vy) in pixels per tick
    pub vel: [f32; 2],
    /// Font size used to draw the glyph
    pub size: f32,
    /// Ticks lived since the last respawn
    pub age: u32,
    /// Tick budget before a forced respawn
    pub lifespan: u32,
    /// Index into the field's glyph set
    pub glyph: usize,
    /// Current rotation in radians
    pub rotation: f32,
    /// Rotation added every tick
    pub rot_speed: f32,
    /// Phase of the lateral sway
    pub wobble: f32,
    /// Phase added every tick
    pub wobble_speed: f32,
}

impl Particle {
    /// A particle at rest at the given position with the given velocity.
    ///
    /// Mostly useful for tests that need to pin a particle's state; the field
    /// itself builds particles through the spawn policy.
    pub fn new(pos: [f32; 2], vel: [f32; 2], lifespan: u32) -> Self {
        Self {
            pos,
            vel,
            size: 16.0,
            age: 0,
            lifespan,
            glyph: 0,
            rotation: 0.0,
            rot_speed: 0.0,
            wobble: 0.0,
            wobble_speed: 0.0,
        }
    }

    /// Ticks left before the lifespan runs out.
    pub fn remaining(&self) -> u32 {
        self.lifespan.saturating_sub(self.age)
    }
}
