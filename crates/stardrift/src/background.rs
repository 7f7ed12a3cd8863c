//! Blits the star field canvas into the terminal.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use stardrift_field::PixelCanvas;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Canvas pixel rows packed into one terminal row.
pub const ROWS_PER_CELL: usize = 2;

/// Widget drawing a [`PixelCanvas`] with two pixels per terminal cell.
#[derive(Debug, Clone, Copy)]
pub struct HalfBlocks<'a> {
    canvas: &'a PixelCanvas,
}

impl<'a> HalfBlocks<'a> {
    pub fn new(canvas: &'a PixelCanvas) -> Self {
        Self { canvas }
    }
}

impl Widget for HalfBlocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..area.height {
            let top_row = y as usize * ROWS_PER_CELL;
            for x in 0..area.width {
                let column = x as usize;
                let top = self.canvas.pixel(column, top_row);
                let bottom = self.canvas.pixel(column, top_row + 1);
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }
    }
}
