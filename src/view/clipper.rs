//! Routes every emitted run through the viewport.
//!
//! Rows above the viewport are dropped without bookkeeping, rows inside it
//! are buffered, and the first emission below it ends the pass by returning
//! [`ViewportFull`]. The renderer propagates that with `?`, so subtrees below
//! the fold are never visited.

use crate::view::line_buffer::{LineBuffer, RunStyle};
use crate::view::surface::ScreenSurface;
use crate::view::viewport::Viewport;
use unicode_width::UnicodeWidthChar;

/// Returned by [`ViewportClipper::emit`] once the visible rows are exhausted.
///
/// This is the normal end of a truncated pass and never leaves the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportFull;

pub struct ViewportClipper {
    viewport: Viewport,
    lines: LineBuffer,
}

impl ViewportClipper {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: LineBuffer::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    pub fn into_lines(self) -> LineBuffer {
        self.lines
    }

    /// Offer one run of document row `row` to the viewport
    pub fn emit(
        &mut self,
        row: usize,
        text: &str,
        style: RunStyle,
        emphasis: bool,
    ) -> Result<(), ViewportFull> {
        if self.viewport.is_below(row) {
            return Err(ViewportFull);
        }
        // Width of rows above the top is not tracked; only visible rows bound
        // horizontal scrolling.
        if self.viewport.is_above(row) {
            return Ok(());
        }
        self.lines.append_run(row, text, style, emphasis);
        Ok(())
    }

    /// Draw the buffered rows, clipped to the viewport columns
    pub fn paint<S: ScreenSurface + ?Sized>(&self, surface: &mut S) {
        let (surface_rows, surface_cols) = surface.size();
        let cols = self.viewport.cols.min(surface_cols);
        let left = self.viewport.origin_col;
        let right = left.saturating_add(cols);

        surface.erase();
        for row in self.lines.rows() {
            let Some(screen_row) = self.viewport.screen_row(row.line_index) else {
                continue;
            };
            if screen_row >= surface_rows {
                break;
            }

            for run in &row.runs {
                let start = run.column;
                let end = start + run.width();
                if end <= left || start >= right {
                    continue;
                }
                let visible_start = start.max(left);
                let visible = slice_columns(
                    &run.text,
                    visible_start - start,
                    right.min(end) - visible_start,
                );
                surface.write_at(
                    screen_row,
                    visible_start - left,
                    &visible,
                    run.style,
                    run.emphasis,
                );
            }

            let tail = row.width.saturating_sub(left).min(cols);
            if tail < cols {
                surface.clear_to_end_of_line(screen_row, tail);
            }
        }
    }
}

/// Display columns `[skip, skip + take)` of `text`.
///
/// A wide character cut by either edge is replaced by spaces for its visible part.
pub(crate) fn slice_columns(text: &str, skip: usize, take: usize) -> String {
    let end = skip.saturating_add(take);
    let mut out = String::new();
    let mut col = 0;
    for ch in text.chars() {
        let next = col + ch.width().unwrap_or(0);
        if next <= skip {
            col = next;
            continue;
        }
        if col >= end {
            break;
        }
        if col >= skip && next <= end {
            out.push(ch);
        } else {
            let visible = next.min(end) - col.max(skip);
            out.extend(std::iter::repeat(' ').take(visible));
        }
        col = next;
    }
    out
}
