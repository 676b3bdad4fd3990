//! Tuning constants for the particle field.
//!
//! All of the cosmetic knobs live in one struct instead of being scattered
//! through the update and draw code. `FieldConfig::default()` reproduces the
//! landing page's look; tests and hosts override individual values.

use std::ops::Range;
use std::time::Duration;

use crate::error::ConfigError;
use crate::resources::GLYPHS;

/// Surface width below which the small pool is used.
pub const MOBILE_BREAKPOINT: f32 = 768.0;
/// Pool size for narrow surfaces.
pub const MOBILE_POOL_SIZE: usize = 15;
/// Pool size for everything else.
pub const DESKTOP_POOL_SIZE: usize = 35;

/// Canonical configuration of the floating glyph layer.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Glyphs particles are drawn with
    pub glyphs: Vec<&'static str>,

    // === Pool sizing ===
    pub mobile_breakpoint: f32,
    pub mobile_pool_size: usize,
    pub desktop_pool_size: usize,

    // === Spawn policy ===
    /// Distance below the bottom edge where fresh particles appear
    pub spawn_offset: f32,
    /// Horizontal drift, centered on zero
    pub drift_x: Range<f32>,
    /// Upward speed magnitude; vy is the negation of a sample from this range
    pub rise_speed: Range<f32>,
    /// Glyph font size
    pub size: Range<f32>,
    /// Lifespan in ticks
    pub lifespan: Range<u32>,
    /// Angular speed in radians per tick, centered on zero
    pub rot_speed: Range<f32>,
    /// Sway phase speed in radians per tick
    pub wobble_speed: Range<f32>,

    // === Motion ===
    /// Lateral sway amplitude in pixels per tick
    pub wobble_amplitude: f32,
    /// Particles above this y respawn
    pub offscreen_threshold: f32,

    // === Rendering ===
    /// Ticks spent fading in and fading out
    pub fade_ticks: u32,
    /// Multiplier applied to every particle's opacity
    pub dimming: f32,

    /// Quiet window before a resize request is applied
    pub resize_debounce: Duration,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            glyphs: GLYPHS.to_vec(),
            mobile_breakpoint: MOBILE_BREAKPOINT,
            mobile_pool_size: MOBILE_POOL_SIZE,
            desktop_pool_size: DESKTOP_POOL_SIZE,
            spawn_offset: 60.0,
            drift_x: -0.4..0.4,
            rise_speed: 0.4..1.6,
            size: 10.0..28.0,
            lifespan: 150..350,
            rot_speed: -0.02..0.02,
            wobble_speed: 0.01..0.04,
            wobble_amplitude: 0.5,
            offscreen_threshold: -80.0,
            fade_ticks: 30,
            dimming: 0.5,
            resize_debounce: Duration::from_millis(200),
        }
    }
}

impl FieldConfig {
    /// Pool size for a surface of the given width.
    pub fn pool_size_for_width(&self, width: f32) -> usize {
        if width < self.mobile_breakpoint {
            self.mobile_pool_size
        } else {
            self.desktop_pool_size
        }
    }

    pub fn with_glyphs(mut self, glyphs: Vec<&'static str>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_lifespan(mut self, lifespan: Range<u32>) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_offscreen_threshold(mut self, threshold: f32) -> Self {
        self.offscreen_threshold = threshold;
        self
    }

    pub fn with_dimming(mut self, dimming: f32) -> Self {
        self.dimming = dimming;
        self
    }

    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }

    /// Check that every range can be sampled and particles always rise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.glyphs.is_empty() {
            return Err(ConfigError::NoGlyphs);
        }

        for (name, range) in [
            ("drift_x", &self.drift_x),
            ("rise_speed", &self.rise_speed),
            ("size", &self.size),
            ("rot_speed", &self.rot_speed),
            ("wobble_speed", &self.wobble_speed),
        ] {
            // rand's uniform sampler needs finite bounds and a finite width
            let finite = range.start.is_finite()
                && range.end.is_finite()
                && (range.end - range.start).is_finite();
            if !finite || range.start >= range.end {
                return Err(ConfigError::BadRange {
                    name,
                    min: range.start,
                    max: range.end,
                });
            }
        }

        if self.rise_speed.start <= 0.0 {
            return Err(ConfigError::NotRising(self.rise_speed.start));
        }
        if self.size.start <= 0.0 {
            return Err(ConfigError::BadRange {
                name: "size",
                min: self.size.start,
                max: self.size.end,
            });
        }
        if self.lifespan.start == 0 || self.lifespan.start >= self.lifespan.end {
            return Err(ConfigError::BadLifespan {
                min: self.lifespan.start,
                max: self.lifespan.end,
            });
        }
        if self.fade_ticks == 0 {
            return Err(ConfigError::NoFadeWindow);
        }
        if !(0.0..=1.0).contains(&self.dimming) {
            return Err(ConfigError::BadDimming(self.dimming));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn pool_size_follows_breakpoint() {
        let config = FieldConfig::default();
        assert_eq!(config.pool_size_for_width(500.0), 15);
        assert_eq!(config.pool_size_for_width(767.9), 15);
        assert_eq!(config.pool_size_for_width(768.0), 35);
        assert_eq!(config.pool_size_for_width(1200.0), 35);
    }

    #[test]
    fn rejects_sinking_particles() {
        let mut config = FieldConfig::default();
        config.rise_speed = 0.0..1.0;
        assert_eq!(config.validate(), Err(ConfigError::NotRising(0.0)));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut config = FieldConfig::default();
        config.size = 28.0..10.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadRange { name: "size", .. })
        ));

        let config = FieldConfig::default().with_lifespan(0..10);
        assert!(matches!(config.validate(), Err(ConfigError::BadLifespan { .. })));
    }

    #[test]
    fn rejects_unbounded_ranges() {
        let mut config = FieldConfig::default();
        config.size = 10.0..f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadRange { name: "size", .. })
        ));

        let mut config = FieldConfig::default();
        config.drift_x = -f32::MAX..f32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadRange { name: "drift_x", .. })
        ));

        let mut config = FieldConfig::default();
        config.wobble_speed = f32::NAN..0.04;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_glyphs_and_bad_dimming() {
        let config = FieldConfig::default().with_glyphs(Vec::new());
        assert_eq!(config.validate(), Err(ConfigError::NoGlyphs));

        let config = FieldConfig::default().with_dimming(1.5);
        assert_eq!(config.validate(), Err(ConfigError::BadDimming(1.5)));
    }
}
