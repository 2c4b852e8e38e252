//! Per-pass accumulator of styled text, one [`Row`] per document line.
//!
//! Rows are appended in non-decreasing line order, so the buffer is a plain
//! vector and "the current row" is always the last one.

use unicode_width::UnicodeWidthStr;

/// Highlighting class of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStyle {
    Plain,
    TagMarkup,
    TagName,
    AttrName,
    AttrValue,
    Text,
    IndentGuide,
}

impl RunStyle {
    pub const ALL: [RunStyle; 7] = [
        RunStyle::Plain,
        RunStyle::TagMarkup,
        RunStyle::TagName,
        RunStyle::AttrName,
        RunStyle::AttrValue,
        RunStyle::Text,
        RunStyle::IndentGuide,
    ];
}

/// A piece of text with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
    pub emphasis: bool,
    /// Document column at which the run starts
    pub column: usize,
}

impl StyledRun {
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// All runs emitted for a single document line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line_index: usize,
    pub runs: Vec<StyledRun>,
    /// Display width of all runs so far
    pub width: usize,
}

impl Row {
    fn new(line_index: usize) -> Self {
        Self {
            line_index,
            runs: Vec::new(),
            width: 0,
        }
    }

    /// Unstyled text of the row
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Debug, Default)]
pub struct LineBuffer {
    rows: Vec<Row>,
    max_width: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run to row `line_index`, creating the row on first touch.
    ///
    /// Returns the column at which the run starts (the row's previous width).
    pub fn append_run(
        &mut self,
        line_index: usize,
        text: &str,
        style: RunStyle,
        emphasis: bool,
    ) -> usize {
        let needs_row = match self.rows.last() {
            Some(last) => {
                debug_assert!(
                    line_index >= last.line_index,
                    "rows must be written in order: {} after {}",
                    line_index,
                    last.line_index
                );
                last.line_index != line_index
            }
            None => true,
        };
        if needs_row {
            self.rows.push(Row::new(line_index));
        }

        let last = self.rows.len() - 1;
        let row = &mut self.rows[last];
        let column = row.width;
        row.width += text.width();
        row.runs.push(StyledRun {
            text: text.to_string(),
            style,
            emphasis,
            column,
        });
        self.max_width = self.max_width.max(row.width);
        column
    }

    pub fn row(&self, line_index: usize) -> Option<&Row> {
        self.rows
            .binary_search_by_key(&line_index, |row| row.line_index)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Width of a row, 0 for rows never touched
    pub fn width_of(&self, line_index: usize) -> usize {
        self.row(line_index).map_or(0, |row| row.width)
    }

    /// Widest row touched this pass
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
