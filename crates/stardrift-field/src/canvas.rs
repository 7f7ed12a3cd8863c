//! In-memory raster surface.

use stardrift_core::{Gradient, Point, Rgb, Surface, Viewport};

/// Background color at the center of the wash.
const WASH_CENTER: Rgb = Rgb::new(0x0f, 0x0f, 0x23);
/// Background color at the corners of the wash.
const WASH_EDGE: Rgb = Rgb::new(0x00, 0x00, 0x00);
/// Peak alpha of a star's glow relative to its core.
const GLOW_STRENGTH: f32 = 0.5;

/// An RGB framebuffer addressed in surface pixels.
///
/// Each canvas pixel covers `scale` x `scale` surface pixels, so a coarse
/// output (such as terminal half-blocks) can host a field laid out in
/// screen-sized coordinates.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    viewport: Viewport,
    scale: f32,
    columns: usize,
    rows: usize,
    pixels: Vec<[f32; 3]>,
    /// Cached background wash for the current size.
    background: Vec<[f32; 3]>,
}

impl PixelCanvas {
    /// Create a canvas of `columns` x `rows` pixels, each covering `scale`
    /// surface pixels per side.
    ///
    /// Returns `None` when there is nothing to draw on.
    pub fn new(columns: usize, rows: usize, scale: f32) -> Option<Self> {
        if columns == 0 || rows == 0 || !scale.is_finite() || scale <= 0.0 {
            return None;
        }
        let mut canvas = Self {
            viewport: Viewport::default(),
            scale,
            columns: 0,
            rows: 0,
            pixels: Vec::new(),
            background: Vec::new(),
        };
        canvas.resize(Self::viewport_for(columns, rows, scale));
        Some(canvas)
    }

    /// Surface size covered by a grid of `columns` x `rows` pixels.
    pub fn viewport_for(columns: usize, rows: usize, scale: f32) -> Viewport {
        Viewport::new(columns as f32 * scale, rows as f32 * scale)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Color of the pixel at `column`, `row`, or black outside the canvas.
    pub fn pixel(&self, column: usize, row: usize) -> Rgb {
        if column >= self.columns || row >= self.rows {
            return Rgb::BLACK;
        }
        let [r, g, b] = self.pixels[row * self.columns + column];
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Center of a canvas pixel in surface coordinates.
    fn pixel_center(&self, column: usize, row: usize) -> Point {
        Point::new(
            (column as f32 + 0.5) * self.scale,
            (row as f32 + 0.5) * self.scale,
        )
    }

    /// Inclusive pixel range covering `[lo, hi]` surface pixels, clamped to
    /// `len`. `None` when the span misses the canvas.
    fn span(&self, lo: f32, hi: f32, len: usize) -> Option<(usize, usize)> {
        let first = (lo / self.scale).floor();
        let last = (hi / self.scale).floor();
        if last < 0.0 || first >= len as f32 {
            return None;
        }
        Some((first.max(0.0) as usize, (last as usize).min(len - 1)))
    }

    fn blend(&mut self, column: usize, row: usize, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let pixel = &mut self.pixels[row * self.columns + column];
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (dst, src) in pixel.iter_mut().zip(src) {
            *dst += (src - *dst) * alpha;
        }
    }

    fn paint_background(&mut self) {
        let cx = self.columns as f32 / 2.0;
        let cy = self.rows as f32 / 2.0;
        self.background = (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| (column, row)))
            .map(|(column, row)| {
                // Elliptical distance, 1.0 at the corners.
                let dx = (column as f32 + 0.5 - cx) / cx;
                let dy = (row as f32 + 0.5 - cy) / cy;
                let t = ((dx * dx + dy * dy) / 2.0).sqrt();
                let rgb = WASH_CENTER.lerp(WASH_EDGE, t);
                [rgb.r as f32, rgb.g as f32, rgb.b as f32]
            })
            .collect();
    }
}

impl Surface for PixelCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.columns = (viewport.width / self.scale).round().max(0.0) as usize;
        self.rows = (viewport.height / self.scale).round().max(0.0) as usize;
        self.pixels = vec![[0.0; 3]; self.columns * self.rows];
        self.paint_background();
    }

    fn clear(&mut self) {
        self.pixels.copy_from_slice(&self.background);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgb, alpha: f32, glow: f32) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        let glow = glow.max(0.0);
        let reach = radius + glow;
        let Some((c0, c1)) = self.span(center.x - reach, center.x + reach, self.columns) else {
            return;
        };
        let Some((r0, r1)) = self.span(center.y - reach, center.y + reach, self.rows) else {
            return;
        };

        // The pixel holding the center always gets the full core, however
        // small the circle is next to a canvas pixel.
        let home = (
            (center.x / self.scale).floor(),
            (center.y / self.scale).floor(),
        );

        for row in r0..=r1 {
            for column in c0..=c1 {
                let p = self.pixel_center(column, row);
                let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
                let intensity = if d <= radius || (column as f32, row as f32) == home {
                    1.0
                } else if glow > 0.0 && d < reach {
                    (1.0 - (d - radius) / glow) * GLOW_STRENGTH
                } else {
                    0.0
                };
                self.blend(column, row, color, alpha.clamp(0.0, 1.0) * intensity);
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, gradient: &Gradient, alpha: f32) {
        if self.columns == 0 || self.rows == 0 {
            return;
        }
        // Anything under half a canvas pixel still shows as one pixel wide.
        let half = (width / 2.0).max(self.scale / 2.0);
        let Some((c0, c1)) = self.span(from.x.min(to.x) - half, from.x.max(to.x) + half, self.columns)
        else {
            return;
        };
        let Some((r0, r1)) = self.span(from.y.min(to.y) - half, from.y.max(to.y) + half, self.rows)
        else {
            return;
        };

        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len_sq = dx * dx + dy * dy;

        for row in r0..=r1 {
            for column in c0..=c1 {
                let p = self.pixel_center(column, row);
                let t = if len_sq > 0.0 {
                    (((p.x - from.x) * dx + (p.y - from.y) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (nx, ny) = (from.x + t * dx, from.y + t * dy);
                let d = ((p.x - nx).powi(2) + (p.y - ny).powi(2)).sqrt();
                if d > half {
                    continue;
                }
                let stop = gradient.sample(t);
                self.blend(column, row, stop.rgb, stop.alpha * alpha.clamp(0.0, 1.0));
            }
        }
    }
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
