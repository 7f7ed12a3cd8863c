//! Core types shared by the stardrift crates.
//!
//! This crate holds the geometry, color, and settings types used by the
//! particle field, the configuration loader, and the terminal host, plus the
//! [`Surface`] trait every drawing target implements.

mod color;
mod surface;

use serde::Deserialize;

pub use color::{ColorStop, Gradient, Rgb, Rgba};
pub use surface::Surface;

/// Dimensions of the drawing surface in surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Width in surface pixels.
    pub width: f32,
    /// Height in surface pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the viewport has nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A position in surface pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Motion preference read once when the field is activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Motion {
    /// Stars twinkle and meteors fly.
    #[default]
    Full,
    /// Stars hold still at their base opacity and no meteors are created.
    Reduced,
}

impl Motion {
    /// Map a "prefers reduced motion" flag to a motion preference.
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            Motion::Reduced
        } else {
            Motion::Full
        }
    }

    /// Whether particles should move.
    pub fn is_enabled(self) -> bool {
        self == Motion::Full
    }
}

/// Animation speed setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to star twinkle rates and meteor speeds.
    pub fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 1.5,
        }
    }

    /// Cycle to the next speed.
    pub fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }
}

/// Tunables for the particle population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSettings {
    /// Upper bound on the number of stars.
    pub max_stars: usize,
    /// Surface pixels per star.
    pub area_per_star: f32,
    /// Size of the meteor pool when motion is enabled.
    pub meteor_count: usize,
    /// Animation speed multiplier.
    pub speed: AnimationSpeed,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            max_stars: 200,
            area_per_star: 8000.0,
            meteor_count: 3,
            speed: AnimationSpeed::Medium,
        }
    }
}

impl FieldSettings {
    /// Number of stars for a surface of the given size.
    pub fn star_count(&self, viewport: Viewport) -> usize {
        if viewport.is_empty() || self.area_per_star <= 0.0 {
            return 0;
        }
        let scaled = (viewport.area() / self.area_per_star).floor() as usize;
        scaled.min(self.max_stars)
    }
}
