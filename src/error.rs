//! Error types for the particle field.

use thiserror::Error;

/// Host capabilities the field needs before it can run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    /// No drawing surface is available; the field stays disabled.
    #[error("no drawing surface available, particle field disabled")]
    MissingSurface,
}

/// Rejected field configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("glyph set must not be empty")]
    NoGlyphs,
    #[error("{name} range is empty or inverted: {min}..{max}")]
    BadRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("lifespan range is empty or starts at zero: {min}..{max}")]
    BadLifespan { min: u32, max: u32 },
    #[error("rising speed must be strictly positive, got minimum {0}")]
    NotRising(f32),
    #[error("fade window must be at least one tick")]
    NoFadeWindow,
    #[error("dimming factor {0} outside 0..=1")]
    BadDimming(f32),
}
