/// The visible window onto the rendered document.
///
/// Origins are document coordinates of the top-left cell; `rows`/`cols` are
/// re-read from the terminal before every pass and may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub origin_row: usize,
    pub origin_col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            origin_row: 0,
            origin_col: 0,
            rows,
            cols,
        }
    }

    /// Same size, different scroll position
    pub fn with_origin(self, origin_row: usize, origin_col: usize) -> Self {
        Self {
            origin_row,
            origin_col,
            ..self
        }
    }

    /// A viewport large enough to hold any document
    pub fn unbounded() -> Self {
        Self::new(usize::MAX, usize::MAX)
    }

    /// True once `row` lies below the last visible row
    pub fn is_below(&self, row: usize) -> bool {
        row >= self.origin_row && row - self.origin_row >= self.rows
    }

    /// True while `row` is scrolled off the top
    pub fn is_above(&self, row: usize) -> bool {
        row < self.origin_row
    }

    /// Screen row for a document row, if it is visible
    pub fn screen_row(&self, row: usize) -> Option<usize> {
        if self.is_above(row) || self.is_below(row) {
            None
        } else {
            Some(row - self.origin_row)
        }
    }
}
