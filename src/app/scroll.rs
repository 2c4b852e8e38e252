//! Scroll position and the rules that bound it.
//!
//! The document extent is never computed up front. Instead each render pass
//! reports whether it reached the end of the document and how wide the visible
//! rows were, and the next command is clamped against that.

use crate::input::keybindings::Action;
use crate::view::tree_renderer::RenderResult;
use crate::view::viewport::Viewport;

/// What the viewer should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State may have changed; run a new render pass
    Redraw,
    /// Nothing to do
    Ignore,
    /// Leave the interactive loop
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollController {
    origin_row: usize,
    origin_col: usize,
    rows: usize,
    cols: usize,
    show_indent_guides: bool,
    last: RenderResult,
}

impl ScrollController {
    pub fn new(show_indent_guides: bool) -> Self {
        Self {
            origin_row: 0,
            origin_col: 0,
            rows: 0,
            cols: 0,
            show_indent_guides,
            last: RenderResult::default(),
        }
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.origin_row, self.origin_col)
    }

    pub fn show_indent_guides(&self) -> bool {
        self.show_indent_guides
    }

    pub fn last_result(&self) -> RenderResult {
        self.last
    }

    /// Update the visible size, read from the terminal before each pass
    pub fn set_size(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Viewport for the next pass
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.rows, self.cols).with_origin(self.origin_row, self.origin_col)
    }

    /// Remember the extent reported by the pass that just finished
    pub fn record(&mut self, result: RenderResult) {
        self.last = result;
    }

    /// Apply a navigation command. Out-of-range moves are silent no-ops.
    pub fn apply(&mut self, action: Action) -> Outcome {
        let at_end = self.last.reached_document_end;
        match action {
            Action::MoveUp => {
                self.origin_row = self.origin_row.saturating_sub(1);
            }
            Action::MoveDown => {
                if !at_end {
                    self.origin_row += 1;
                }
            }
            Action::MoveLeft => {
                self.origin_col = self.origin_col.saturating_sub(1);
            }
            Action::MoveRight => {
                // Stop once the widest row's end is already on screen
                if self.last.longest_row_width.saturating_sub(self.origin_col) >= self.cols
                    && self.last.longest_row_width > self.origin_col
                {
                    self.origin_col += 1;
                }
            }
            Action::PageDown => {
                if !at_end {
                    self.origin_row += self.rows;
                }
            }
            Action::PageUp => {
                self.origin_row = self.origin_row.saturating_sub(self.rows);
            }
            Action::GoToTop => {
                self.origin_row = 0;
                self.origin_col = 0;
            }
            Action::ToggleGuides => {
                self.show_indent_guides = !self.show_indent_guides;
            }
            Action::Resize => {}
            Action::Quit => return Outcome::Quit,
            Action::None => return Outcome::Ignore,
        }
        tracing::debug!(
            "{:?}: origin=({}, {}) guides={}",
            action,
            self.origin_row,
            self.origin_col,
            self.show_indent_guides
        );
        Outcome::Redraw
    }
}
