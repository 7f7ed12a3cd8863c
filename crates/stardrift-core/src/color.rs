//! Color and gradient types.

use ratatui::style::Color;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// A color with a straight (non-premultiplied) alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            rgb: Rgb::new(r, g, b),
            alpha,
        }
    }
}

/// A color stop at `offset` in `[0, 1]` along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A linear gradient over borrowed color stops, sorted by offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient<'a> {
    stops: &'a [ColorStop],
}

impl<'a> Gradient<'a> {
    pub const fn new(stops: &'a [ColorStop]) -> Self {
        Self { stops }
    }

    /// Sample the gradient at offset `t`. Offsets outside the first and last
    /// stop take the color of the nearest stop.
    pub fn sample(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::new(0, 0, 0, 0.0);
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return Rgba {
                    rgb: a.color.rgb.lerp(b.color.rgb, local),
                    alpha: a.color.alpha + (b.color.alpha - a.color.alpha) * local,
                };
            }
        }
        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const STOPS: [ColorStop; 3] = [
        ColorStop::new(0.0, Rgba::new(255, 255, 255, 1.0)),
        ColorStop::new(0.5, Rgba::new(100, 149, 237, 0.8)),
        ColorStop::new(1.0, Rgba::new(100, 149, 237, 0.0)),
    ];

    #[test]
    fn test_gradient_hits_stops() {
        let gradient = Gradient::new(&STOPS);
        assert_eq!(gradient.sample(0.0), STOPS[0].color);
        assert_eq!(gradient.sample(0.5).rgb, Rgb::new(100, 149, 237));
        assert_relative_eq!(gradient.sample(0.5).alpha, 0.8);
        assert_relative_eq!(gradient.sample(1.0).alpha, 0.0);
    }

    #[test]
    fn test_gradient_interpolates() {
        let gradient = Gradient::new(&STOPS);
        let quarter = gradient.sample(0.25);
        assert_eq!(quarter.rgb, Rgb::new(178, 202, 246));
        assert_relative_eq!(quarter.alpha, 0.9);
        assert_relative_eq!(gradient.sample(0.75).alpha, 0.4);
    }

    #[test]
    fn test_gradient_clamps_outside_range() {
        let gradient = Gradient::new(&STOPS);
        assert_eq!(gradient.sample(-1.0), STOPS[0].color);
        assert_eq!(gradient.sample(2.0), STOPS[2].color);
    }

    #[test]
    fn test_empty_gradient_is_transparent() {
        let gradient = Gradient::new(&[]);
        assert_eq!(gradient.sample(0.3).alpha, 0.0);
    }

    #[test]
    fn test_rgb_to_ratatui_color() {
        assert_eq!(Color::from(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
