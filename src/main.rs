//! Floating Glyphs - Main Entry
//!
//! Hosts the particle field in a desktop window.
//!
//! The glyphs are emoji, which bevy's built-in font lacks. Put a monochrome
//! emoji font (e.g. Noto Emoji) at `assets/fonts/NotoEmoji-Regular.ttf`;
//! without it the glyphs show as missing-glyph boxes.

use bevy::prelude::*;
use floating_glyphs::render::ParticleFieldPlugin;

/// Emoji-capable font for the glyph set, relative to `assets/`.
const GLYPH_FONT: &str = "fonts/NotoEmoji-Regular.ttf";

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.12, 0.07, 0.14)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Floating Glyphs".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ParticleFieldPlugin {
            font: Some(GLYPH_FONT.into()),
            ..default()
        })
        .add_systems(Startup, setup_camera)
        .run();
}

/// Set up the 2D main camera
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
