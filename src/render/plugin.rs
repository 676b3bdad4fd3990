//! bevy host for the particle field.
//!
//! The `Update` schedule is the frame source, the primary window is both the
//! drawing surface and the viewport, and `WindowResized` events are the resize
//! notifications. Each recorded glyph is shown through a pooled `Text2d`
//! entity.

use bevy::{
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};
use rand::{rngs::StdRng, SeedableRng};

use super::RecordingSurface;
use crate::error::FieldError;
use crate::simulation::{FieldConfig, ParticleField};

/// Plugin that runs the floating glyph layer in the primary window.
#[derive(Clone, Debug, Default)]
pub struct ParticleFieldPlugin {
    pub config: FieldConfig,
    /// Seed for the spawn generator; entropy when `None`
    pub seed: Option<u64>,
    /// Asset path of a font covering the glyph set. bevy's built-in font has
    /// no emoji, so without one the glyphs render as missing-glyph boxes.
    pub font: Option<String>,
}

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FieldSettings {
            config: self.config.clone(),
            seed: self.seed,
            font: self.font.clone(),
        })
        .add_systems(Startup, start_field)
        .add_systems(
            Update,
            (settle_resizes, queue_resizes, tick_field, sync_glyph_slots)
                .chain()
                .run_if(resource_exists::<FieldHost>),
        );
    }
}

#[derive(Resource)]
struct FieldSettings {
    config: FieldConfig,
    seed: Option<u64>,
    font: Option<String>,
}

/// The running field and the surface it draws onto.
///
/// Only inserted when startup found a drawing surface; every per-frame system
/// is gated on it.
#[derive(Resource)]
pub struct FieldHost {
    pub field: ParticleField<StdRng>,
    pub surface: RecordingSurface,
}

/// Text entity showing the n-th glyph drawn each frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlyphSlot(pub usize);

/// Size of the primary window, or the missing-surface error.
fn probe_surface(windows: &Query<&Window, With<PrimaryWindow>>) -> Result<[f32; 2], FieldError> {
    windows
        .get_single()
        .map(|window| [window.width(), window.height()])
        .map_err(|_| FieldError::MissingSurface)
}

fn start_field(
    mut commands: Commands,
    settings: Res<FieldSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    asset_server: Option<Res<AssetServer>>,
) {
    let [width, height] = match probe_surface(&windows) {
        Ok(size) => size,
        Err(err) => {
            // Purely decorative, so a missing surface just disables the layer
            debug!("{err}");
            return;
        }
    };

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let field = match ParticleField::for_viewport(settings.config.clone(), width, height, rng) {
        Ok(field) => field,
        Err(err) => {
            warn!("Particle field config rejected: {err}");
            return;
        }
    };

    let font: Handle<Font> = match (&settings.font, asset_server) {
        (Some(path), Some(assets)) => assets.load(path.as_str()),
        (Some(path), None) => {
            warn!("No asset server, glyph font {path} not loaded");
            Handle::default()
        }
        (None, _) => Handle::default(),
    };

    for slot in 0..field.pool_size() {
        commands.spawn((
            GlyphSlot(slot),
            Text2d::new(""),
            TextFont {
                font: font.clone(),
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::default(),
            Visibility::Hidden,
        ));
    }

    commands.insert_resource(FieldHost {
        field,
        surface: RecordingSurface::new(),
    });
}

/// Count the last frame's time against pending resizes.
///
/// Runs before this frame's events are queued, so a fresh request gets its
/// full quiet window.
fn settle_resizes(time: Res<Time>, mut host: ResMut<FieldHost>) {
    host.field.advance_time(time.delta());
}

fn queue_resizes(mut resized: EventReader<WindowResized>, mut host: ResMut<FieldHost>) {
    for event in resized.read() {
        host.field.resize(event.width, event.height);
    }
}

fn tick_field(mut host: ResMut<FieldHost>) {
    let FieldHost { field, surface } = &mut *host;
    surface.reset();
    field.tick(surface);
}

/// Copy this frame's recorded glyphs onto the text entities.
///
/// Surface space has its origin top-left with y down; the 2D camera is
/// centered with y up.
fn sync_glyph_slots(
    host: Res<FieldHost>,
    mut slots: Query<(
        &GlyphSlot,
        &mut Text2d,
        &mut TextFont,
        &mut TextColor,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let [width, height] = host.field.bounds();
    let sprites = host.surface.sprites();

    for (slot, mut text, mut font, mut color, mut transform, mut visibility) in &mut slots {
        let Some(sprite) = sprites.get(slot.0) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        if text.0 != sprite.glyph {
            text.0.clone_from(&sprite.glyph);
        }
        font.font_size = sprite.size;
        color.0 = Color::srgba(1.0, 1.0, 1.0, sprite.alpha);
        *transform = Transform::from_xyz(
            sprite.pos[0] - width / 2.0,
            height / 2.0 - sprite.pos[1],
            0.0,
        )
        .with_rotation(Quat::from_rotation_z(-sprite.rotation));
        *visibility = Visibility::Visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app_with(plugin: ParticleFieldPlugin) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<WindowResized>()
            .add_plugins(plugin);
        app
    }

    #[test]
    fn missing_window_disables_field() {
        let mut app = app_with(ParticleFieldPlugin::default());
        app.update();
        app.update();

        assert!(app.world().get_resource::<FieldHost>().is_none());
        let mut slots = app.world_mut().query::<&GlyphSlot>();
        assert_eq!(slots.iter(app.world()).count(), 0);
    }

    #[test]
    fn probe_reports_missing_surface() {
        let mut app = App::new();
        let mut state = bevy::ecs::system::SystemState::<Query<&Window, With<PrimaryWindow>>>::new(
            app.world_mut(),
        );
        let windows = state.get(app.world());
        assert_eq!(probe_surface(&windows), Err(FieldError::MissingSurface));
    }

    #[test]
    fn window_starts_field_with_one_slot_per_particle() {
        let mut app = app_with(ParticleFieldPlugin {
            seed: Some(9),
            ..default()
        });
        let mut window = Window::default();
        window.resolution.set(500.0, 700.0);
        app.world_mut().spawn((window, PrimaryWindow));

        app.update();
        app.update();

        let host = app.world().resource::<FieldHost>();
        assert_eq!(host.field.pool_size(), 15);
        assert!(host.field.stats().ticks >= 1);

        let mut slots = app.world_mut().query::<&GlyphSlot>();
        assert_eq!(slots.iter(app.world()).count(), 15);
    }

    fn app_with_window(plugin: ParticleFieldPlugin) -> (App, Entity) {
        let mut app = app_with(plugin);
        let mut window = Window::default();
        window.resolution.set(1200.0, 800.0);
        let entity = app.world_mut().spawn((window, PrimaryWindow)).id();
        (app, entity)
    }

    #[test]
    fn window_resize_reaches_field_after_full_window() {
        let (mut app, window) = app_with_window(ParticleFieldPlugin {
            seed: Some(4),
            ..default()
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.update();
        app.update();

        for width in [900.0, 700.0, 375.0] {
            app.world_mut().send_event(WindowResized {
                window,
                width,
                height: 667.0,
            });
        }
        app.update();
        assert_eq!(app.world().resource::<FieldHost>().field.bounds(), [1200.0, 800.0]);

        // 100ms after the request: still inside the 200ms window
        app.update();
        assert_eq!(app.world().resource::<FieldHost>().field.bounds(), [1200.0, 800.0]);

        app.update();
        let host = app.world().resource::<FieldHost>();
        assert_eq!(host.field.bounds(), [375.0, 667.0]);
        assert_eq!(host.field.stats().resizes, 1);
    }

    #[test]
    fn glyph_font_is_loaded_for_every_slot() {
        let (mut app, _) = app_with_window(ParticleFieldPlugin {
            seed: Some(5),
            font: Some("fonts/NotoEmoji-Regular.ttf".into()),
            ..default()
        });
        app.add_plugins(AssetPlugin::default()).init_asset::<Font>();
        app.update();

        let mut slots = app.world_mut().query::<(&GlyphSlot, &TextFont)>();
        let fonts: Vec<_> = slots.iter(app.world()).map(|(_, f)| f.font.clone()).collect();
        assert_eq!(fonts.len(), 35);
        assert!(fonts.iter().all(|f| *f != Handle::<Font>::default()));
    }

    #[test]
    fn missing_asset_server_falls_back_to_default_font() {
        let (mut app, _) = app_with_window(ParticleFieldPlugin {
            seed: Some(6),
            font: Some("fonts/NotoEmoji-Regular.ttf".into()),
            ..default()
        });
        app.update();

        let mut slots = app.world_mut().query::<&TextFont>();
        assert!(slots
            .iter(app.world())
            .all(|f| f.font == Handle::<Font>::default()));
    }
}
