//! The drawing target the particle field paints onto.

use crate::{Gradient, Point, Rgb, Viewport};

/// A pixel-addressable drawing target.
///
/// Alpha values passed in may fall slightly outside `[0, 1]`; implementations
/// clamp them when compositing.
pub trait Surface {
    /// Current size in surface pixels.
    fn viewport(&self) -> Viewport;

    /// Resize the surface. Contents after a resize are unspecified until the
    /// next [`Surface::clear`].
    fn resize(&mut self, viewport: Viewport);

    /// Clear the whole surface to its background.
    fn clear(&mut self);

    /// Fill a circle with `color` at `alpha`, surrounded by a soft glow that
    /// fades out over `glow` pixels past the edge.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb, alpha: f32, glow: f32);

    /// Stroke a round-capped line of `width` pixels. The gradient is sampled
    /// from `from` (offset 0) to `to` (offset 1) and multiplied by `alpha`.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, gradient: &Gradient, alpha: f32);
}
