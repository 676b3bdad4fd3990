//! Floating Glyphs Library
//!
//! Decorative particle field: a fixed pool of glyphs drifting upward,
//! exposed as a host-driven simulator for testing and reuse.

pub mod error;
pub mod render;
pub mod resources;
pub mod simulation;
