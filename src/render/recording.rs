//! A drawing surface that keeps what was drawn instead of rasterizing it.
//!
//! Hosts that render glyphs as scene entities read back the resolved
//! [`GlyphSprite`]s each frame; tests inspect the raw command stream.

use bevy::math::{Affine2, Vec2};

use super::DrawingSurface;

/// One call made against the surface.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    Save,
    Restore,
    SetGlobalAlpha(f32),
    Translate(f32, f32),
    Rotate(f32),
    SetFontSize(f32),
    FillText(String),
}

/// A glyph as it would appear on screen, with the transform already applied.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphSprite {
    pub glyph: String,
    /// Surface-space center of the glyph
    pub pos: [f32; 2],
    pub rotation: f32,
    pub size: f32,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug)]
struct SurfaceState {
    transform: Affine2,
    alpha: f32,
    font_size: f32,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            font_size: 10.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<DrawCommand>,
    sprites: Vec<GlyphSprite>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded so far and reset the drawing state.
    pub fn reset(&mut self) {
        self.state = SurfaceState::default();
        self.stack.clear();
        self.commands.clear();
        self.sprites.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Glyphs currently visible, in draw order.
    pub fn sprites(&self) -> &[GlyphSprite] {
        &self.sprites
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn global_alpha(&self) -> f32 {
        self.state.alpha
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
        self.sprites.retain(|s| {
            let [sx, sy] = s.pos;
            !(sx >= x && sx < x + width && sy >= y && sy < y + height)
        });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
        // Unbalanced restore is a no-op, same as a canvas
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn set_font_size(&mut self, size: f32) {
        self.commands.push(DrawCommand::SetFontSize(size));
        self.state.font_size = size;
    }

    fn fill_text_centered(&mut self, text: &str) {
        self.commands.push(DrawCommand::FillText(text.to_owned()));

        let transform = self.state.transform;
        let x_axis = transform.matrix2.x_axis;
        self.sprites.push(GlyphSprite {
            glyph: text.to_owned(),
            pos: transform.translation.to_array(),
            rotation: x_axis.y.atan2(x_axis.x),
            size: self.state.font_size,
            alpha: self.state.alpha,
        });
    }
}
