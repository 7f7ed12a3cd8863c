//! Twinkling stars.

use fastrand::Rng;
use stardrift_core::{Point, Rgb, Surface, Viewport};

/// Opacity the twinkle oscillates around.
const TWINKLE_MIDPOINT: f32 = 0.3;
/// Amplitude of the twinkle oscillation.
const TWINKLE_AMPLITUDE: f32 = 0.4;

/// A point particle whose opacity oscillates over time.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Horizontal position in surface pixels.
    pub x: f32,
    /// Vertical position in surface pixels.
    pub y: f32,
    /// Circle radius in surface pixels.
    pub radius: f32,
    /// Opacity assigned at creation. Held as-is when motion is reduced.
    pub base_opacity: f32,
    /// Opacity used for the next draw.
    pub opacity: f32,
    /// Current twinkle phase in radians.
    pub phase: f32,
    /// Phase advance per frame.
    pub rate: f32,
}

impl Star {
    /// Create a star at a random position inside `viewport`.
    pub fn random(rng: &mut Rng, viewport: Viewport, speed: f32) -> Self {
        let base_opacity = rng.f32() * 0.8 + 0.2;
        Self {
            x: rng.f32() * viewport.width,
            y: rng.f32() * viewport.height,
            radius: rng.f32() * 2.0 + 0.5,
            base_opacity,
            opacity: base_opacity,
            phase: 0.0,
            rate: (rng.f32() * 0.02 + 0.01) * speed,
        }
    }

    /// Advance the twinkle phase by one frame.
    ///
    /// The result can dip below zero at the trough of the wave; surfaces
    /// clamp alpha when compositing.
    pub fn twinkle(&mut self) {
        self.phase += self.rate;
        self.opacity = TWINKLE_MIDPOINT + TWINKLE_AMPLITUDE * self.phase.sin();
    }

    /// Draw the star as a glowing white dot.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(
            Point::new(self.x, self.y),
            self.radius,
            Rgb::WHITE,
            self.opacity,
            self.radius * 2.0,
        );
    }
}

/// Generate a fresh star population for `viewport`.
pub fn populate(rng: &mut Rng, viewport: Viewport, count: usize, speed: f32) -> Vec<Star> {
    (0..count)
        .map(|_| Star::random(rng, viewport, speed))
        .collect()
}
