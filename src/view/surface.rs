//! Drawing target for a render pass.
//!
//! Callers clip before writing; implementations only translate coordinates
//! and styles.

use crate::view::line_buffer::RunStyle;
use crate::view::theme::Palette;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;

pub trait ScreenSurface {
    /// Visible size as `(rows, cols)`
    fn size(&self) -> (usize, usize);

    /// Blank the whole surface
    fn erase(&mut self);

    fn write_at(&mut self, row: usize, col: usize, text: &str, style: RunStyle, emphasis: bool);

    /// Blank `row` from `col` to the right edge
    fn clear_to_end_of_line(&mut self, row: usize, col: usize);
}

/// [`ScreenSurface`] over a ratatui frame buffer
pub struct BufferSurface<'a> {
    buffer: &'a mut Buffer,
    palette: &'a Palette,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buffer: &'a mut Buffer, palette: &'a Palette) -> Self {
        Self { buffer, palette }
    }

    fn position(&self, row: usize, col: usize) -> Option<Position> {
        let (rows, cols) = self.size();
        if row >= rows || col >= cols {
            return None;
        }
        let area = self.buffer.area;
        Some(Position::new(area.x + col as u16, area.y + row as u16))
    }
}

impl ScreenSurface for BufferSurface<'_> {
    fn size(&self) -> (usize, usize) {
        let area = self.buffer.area;
        (area.height as usize, area.width as usize)
    }

    fn erase(&mut self) {
        self.buffer.reset();
    }

    fn write_at(&mut self, row: usize, col: usize, text: &str, style: RunStyle, emphasis: bool) {
        let Some(pos) = self.position(row, col) else {
            return;
        };
        let max_width = self.size().1 - col;
        let style = self.palette.style(style, emphasis);
        self.buffer.set_stringn(pos.x, pos.y, text, max_width, style);
    }

    fn clear_to_end_of_line(&mut self, row: usize, col: usize) {
        let Some(start) = self.position(row, col) else {
            return;
        };
        let right = self.buffer.area.right();
        for x in start.x..right {
            if let Some(cell) = self.buffer.cell_mut(Position::new(x, start.y)) {
                cell.reset();
            }
        }
    }
}
