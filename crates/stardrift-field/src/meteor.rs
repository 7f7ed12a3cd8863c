//! Meteor streaks (stateful, recycled in place).

use std::f32::consts::FRAC_PI_4;

use fastrand::Rng;
use log::trace;
use stardrift_core::{ColorStop, Gradient, Point, Rgba, Surface, Viewport};

/// Travel direction: down and to the left at 45 degrees.
pub const METEOR_ANGLE: f32 = FRAC_PI_4;
/// Opacity gained per frame while fading in.
pub const FADE_IN_STEP: f32 = 0.02;
/// Opacity lost per frame while fading out.
pub const FADE_OUT_STEP: f32 = 0.01;
/// Height above the surface where meteors enter.
pub const ENTRY_Y: f32 = -50.0;
/// Distance past the left edge before a meteor is recycled.
const EXIT_LEFT: f32 = -100.0;
/// Distance past the bottom edge before a meteor is recycled.
const EXIT_BOTTOM_MARGIN: f32 = 50.0;
/// Horizontal offset applied to the entry position.
const ENTRY_X_OFFSET: f32 = 100.0;
/// Stroke width of the trail.
pub const TRAIL_WIDTH: f32 = 2.0;

const TRAIL_STOPS: [ColorStop; 3] = [
    ColorStop::new(0.0, Rgba::new(255, 255, 255, 1.0)),
    ColorStop::new(0.5, Rgba::new(100, 149, 237, 0.8)),
    ColorStop::new(1.0, Rgba::new(100, 149, 237, 0.0)),
];

/// White at the head, cornflower blue halfway, transparent at the tail.
pub const TRAIL_GRADIENT: Gradient<'static> = Gradient::new(&TRAIL_STOPS);

/// A diagonal streak with a fade-in/fade-out lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Horizontal position of the head, in surface pixels.
    pub x: f32,
    /// Vertical position of the head, in surface pixels.
    pub y: f32,
    /// Trail length in pixels, fixed for the meteor's lifetime.
    pub length: f32,
    /// Pixels travelled per frame, fixed for the meteor's lifetime.
    pub speed: f32,
    /// Travel direction in radians, measured down from the leftward horizontal.
    pub angle: f32,
    /// Current trail opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the meteor is still brightening.
    pub fade_in: bool,
}

impl Meteor {
    /// Create a meteor in its entry state.
    pub fn new(rng: &mut Rng, viewport: Viewport, speed: f32) -> Self {
        let mut meteor = Self {
            x: 0.0,
            y: ENTRY_Y,
            length: 0.0,
            speed: 0.0,
            angle: METEOR_ANGLE,
            opacity: 0.0,
            fade_in: true,
        };
        meteor.reset(rng, viewport, speed);
        meteor
    }

    /// Recycle the meteor into a fresh entry state above the surface.
    pub fn reset(&mut self, rng: &mut Rng, viewport: Viewport, speed: f32) {
        self.x = rng.f32() * viewport.width + ENTRY_X_OFFSET;
        self.y = ENTRY_Y;
        self.length = rng.f32() * 80.0 + 20.0;
        self.speed = (rng.f32() * 3.0 + 2.0) * speed;
        self.angle = METEOR_ANGLE;
        self.opacity = 0.0;
        self.fade_in = true;
    }

    /// Move one frame along the travel direction and step the fade.
    pub(crate) fn advance(&mut self) {
        self.x -= self.speed * self.angle.cos();
        self.y += self.speed * self.angle.sin();

        if self.fade_in {
            self.opacity += FADE_IN_STEP;
            if self.opacity >= 1.0 {
                self.opacity = 1.0;
                self.fade_in = false;
            }
        } else {
            self.opacity = (self.opacity - FADE_OUT_STEP).max(0.0);
        }
    }

    /// Whether the meteor has left the surface or faded out completely.
    pub fn is_spent(&self, viewport: Viewport) -> bool {
        self.x < EXIT_LEFT
            || self.y > viewport.height + EXIT_BOTTOM_MARGIN
            || self.opacity <= 0.0
    }

    /// Advance one frame, recycling the meteor once it is spent.
    /// Returns `true` when a reset happened.
    pub fn update(&mut self, rng: &mut Rng, viewport: Viewport, speed: f32) -> bool {
        self.advance();
        if self.is_spent(viewport) {
            trace!(
                "recycling meteor at ({:.1}, {:.1}) opacity {:.2}",
                self.x,
                self.y,
                self.opacity
            );
            self.reset(rng, viewport, speed);
            return true;
        }
        false
    }

    /// End of the trail, behind the head along the travel direction.
    pub fn tail(&self) -> Point {
        Point::new(
            self.x + self.length * self.angle.cos(),
            self.y - self.length * self.angle.sin(),
        )
    }

    /// Draw the trail. Invisible meteors draw nothing.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        if self.opacity <= 0.0 {
            return;
        }
        surface.stroke_line(
            Point::new(self.x, self.y),
            self.tail(),
            TRAIL_WIDTH,
            &TRAIL_GRADIENT,
            self.opacity,
        );
    }
}
