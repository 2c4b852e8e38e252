//! Lays an [`Element`] tree out as indented, highlighted rows.
//!
//! The walk is depth-first in document order, threading the current row and
//! nesting level through the recursion, so rows are emitted in non-decreasing
//! order. Every run goes through the [`ViewportClipper`]; when it reports
//! [`ViewportFull`] the walk unwinds immediately.

use crate::model::element::{strip_namespace, Element, MAX_DEPTH};
use crate::view::clipper::{ViewportClipper, ViewportFull};
use crate::view::line_buffer::{LineBuffer, RunStyle};
use crate::view::viewport::Viewport;

/// Leaf text shorter than this (in characters, after trimming) stays on the
/// tag's line
pub const COLLAPSE_THRESHOLD: usize = 36;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns per nesting level
    pub indent_width: usize,
    /// Draw `guide_glyph` at the start of every indent level
    pub show_indent_guides: bool,
    pub guide_glyph: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            show_indent_guides: false,
            guide_glyph: "│".to_string(),
        }
    }
}

/// What a pass learned about the document extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderResult {
    /// The walk finished without running out of visible rows
    pub reached_document_end: bool,
    /// Widest row inside the viewport
    pub longest_row_width: usize,
}

/// Stands in for the content of an element whose children are too deep to show
pub const ELIDED_CONTENT: &str = "…";

/// How a single element is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout<'e> {
    /// `<tag/>`
    SelfClosing,
    /// `<tag></tag>`
    EmptyBody,
    /// `<tag>text</tag>`
    Collapsed(&'e str),
    /// Open tag, text lines, children, close tag on separate rows
    Expanded,
    /// `<tag>…</tag>`; children would sit past [`MAX_DEPTH`]
    Elided,
}

/// Layout of `element` at nesting `level` (the root is level 0)
fn layout(element: &Element, level: usize) -> Layout<'_> {
    if element.has_children() && level + 1 >= MAX_DEPTH {
        return Layout::Elided;
    }
    if element.has_children() {
        return Layout::Expanded;
    }
    match element.text.as_deref() {
        None => Layout::SelfClosing,
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Layout::EmptyBody
            } else if !trimmed.contains(['\n', '\r'])
                && trimmed.chars().count() < COLLAPSE_THRESHOLD
            {
                Layout::Collapsed(trimmed)
            } else {
                Layout::Expanded
            }
        }
    }
}

/// Trimmed, non-blank lines of an element's text
fn text_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Control characters (tabs included) would desync column math; show them as spaces
fn sanitize(text: &str) -> std::borrow::Cow<'_, str> {
    if text.chars().any(char::is_control) {
        text.chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect::<String>()
            .into()
    } else {
        text.into()
    }
}

/// Attribute value inside double quotes, with embedded quotes escaped
fn quote_value(value: &str) -> String {
    format!("\"{}\"", sanitize(&value.replace('"', "&quot;")))
}

pub struct TreeRenderer {
    options: RenderOptions,
}

impl TreeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `root` into `out`, stopping as soon as the viewport is full
    pub fn render(&self, root: &Element, out: &mut ViewportClipper) -> RenderResult {
        let reached_document_end = self.render_element(root, 0, 0, out).is_ok();
        let result = RenderResult {
            reached_document_end,
            longest_row_width: out.lines().max_width(),
        };
        tracing::trace!(
            "Render pass: {} rows buffered, {:?}",
            out.lines().len(),
            result
        );
        result
    }

    /// Render the whole document without a viewport, e.g. for printing
    pub fn render_all(&self, root: &Element) -> LineBuffer {
        let mut out = ViewportClipper::new(Viewport::unbounded());
        self.render(root, &mut out);
        out.into_lines()
    }

    /// Lay out `element` starting at `line`; returns the last line used
    fn render_element(
        &self,
        element: &Element,
        line: usize,
        level: usize,
        out: &mut ViewportClipper,
    ) -> Result<usize, ViewportFull> {
        match layout(element, level) {
            Layout::SelfClosing => {
                self.open_tag(element, line, level, "/>", out)?;
                Ok(line)
            }
            Layout::EmptyBody => {
                self.open_tag(element, line, level, ">", out)?;
                self.close_tag(element, line, out)?;
                Ok(line)
            }
            Layout::Collapsed(text) => {
                self.open_tag(element, line, level, ">", out)?;
                out.emit(line, &sanitize(text), RunStyle::Text, false)?;
                self.close_tag(element, line, out)?;
                Ok(line)
            }
            Layout::Elided => {
                self.open_tag(element, line, level, ">", out)?;
                out.emit(line, ELIDED_CONTENT, RunStyle::TagMarkup, false)?;
                self.close_tag(element, line, out)?;
                Ok(line)
            }
            Layout::Expanded => {
                self.open_tag(element, line, level, ">", out)?;
                let mut line = line;

                if let Some(text) = element.text.as_deref() {
                    for text_line in text_lines(text) {
                        line += 1;
                        self.indent(line, level + 1, out)?;
                        out.emit(line, &sanitize(text_line), RunStyle::Text, false)?;
                    }
                }

                for child in &element.children {
                    line = self.render_element(child, line + 1, level + 1, out)?;
                }

                line += 1;
                self.indent(line, level, out)?;
                self.close_tag(element, line, out)?;
                Ok(line)
            }
        }
    }

    fn indent(
        &self,
        line: usize,
        level: usize,
        out: &mut ViewportClipper,
    ) -> Result<(), ViewportFull> {
        if level == 0 {
            return Ok(());
        }
        let width = self.options.indent_width;
        if self.options.show_indent_guides {
            let unit = format!(
                "{}{}",
                self.options.guide_glyph,
                " ".repeat(width.saturating_sub(1))
            );
            for _ in 0..level {
                out.emit(line, &unit, RunStyle::IndentGuide, false)?;
            }
            Ok(())
        } else {
            out.emit(line, &" ".repeat(level * width), RunStyle::Plain, false)
        }
    }

    /// Indent plus `<tag attr="value" ...` followed by `terminator`
    fn open_tag(
        &self,
        element: &Element,
        line: usize,
        level: usize,
        terminator: &str,
        out: &mut ViewportClipper,
    ) -> Result<(), ViewportFull> {
        self.indent(line, level, out)?;
        out.emit(line, "<", RunStyle::TagMarkup, false)?;
        out.emit(line, &sanitize(element.local_name()), RunStyle::TagName, true)?;

        let mut attributes: Vec<(&str, &str)> = element
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        attributes.sort_by(|(a, _), (b, _)| {
            strip_namespace(a)
                .cmp(strip_namespace(b))
                .then_with(|| a.cmp(b))
        });

        for (name, value) in attributes {
            out.emit(line, " ", RunStyle::Plain, false)?;
            out.emit(line, &sanitize(strip_namespace(name)), RunStyle::AttrName, true)?;
            out.emit(line, "=", RunStyle::TagMarkup, false)?;
            out.emit(line, &quote_value(value), RunStyle::AttrValue, false)?;
        }

        out.emit(line, terminator, RunStyle::TagMarkup, false)
    }

    /// `</tag>` appended to `line`; indentation is the caller's job
    fn close_tag(
        &self,
        element: &Element,
        line: usize,
        out: &mut ViewportClipper,
    ) -> Result<(), ViewportFull> {
        out.emit(line, "</", RunStyle::TagMarkup, false)?;
        out.emit(line, &sanitize(element.local_name()), RunStyle::TagName, true)?;
        out.emit(line, ">", RunStyle::TagMarkup, false)
    }
}
