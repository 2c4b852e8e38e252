//! The interactive viewer: one render pass per accepted command.

pub mod scroll;

use crate::config::{Config, ConfigError};
use crate::input::keybindings::{Action, KeybindingResolver};
use crate::model::element::Element;
use crate::view::clipper::ViewportClipper;
use crate::view::surface::{BufferSurface, ScreenSurface};
use crate::view::theme::Palette;
use crate::view::tree_renderer::{RenderOptions, RenderResult, TreeRenderer};
use crossterm::event::{Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use scroll::{Outcome, ScrollController};
use std::io::{self, Write};

pub struct Viewer {
    /// Shared read-only by every pass
    document: Element,

    /// Layout settings from config; the guide toggle lives in `scroll`
    options: RenderOptions,

    palette: Palette,

    keybindings: KeybindingResolver,

    scroll: ScrollController,
}

impl Viewer {
    pub fn new(document: Element, config: &Config) -> Result<Self, ConfigError> {
        let palette = Palette::from_config(&config.palette)?;
        let options = RenderOptions {
            indent_width: config.viewer.indent_width,
            show_indent_guides: config.viewer.show_indent_guides,
            guide_glyph: config.viewer.guide_glyph.clone(),
        };
        Ok(Self {
            document,
            scroll: ScrollController::new(options.show_indent_guides),
            options,
            palette,
            keybindings: KeybindingResolver::new(config),
        })
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn document(&self) -> &Element {
        &self.document
    }

    /// Run a render pass into a ratatui frame
    pub fn render(&mut self, frame: &mut Frame) -> RenderResult {
        let mut surface = BufferSurface::new(frame.buffer_mut(), &self.palette);
        render_pass(&self.document, &self.options, &mut self.scroll, &mut surface)
    }

    /// Run a render pass into any surface
    pub fn render_to<S: ScreenSurface + ?Sized>(&mut self, surface: &mut S) -> RenderResult {
        render_pass(&self.document, &self.options, &mut self.scroll, surface)
    }

    /// Apply a single action directly, bypassing key resolution
    pub fn apply(&mut self, action: Action) -> Outcome {
        self.scroll.apply(action)
    }

    /// Translate a terminal event and apply it
    pub fn handle_event(&mut self, event: Event) -> Outcome {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let action = self.keybindings.resolve(&key);
                self.scroll.apply(action)
            }
            Event::Resize(cols, rows) => {
                tracing::debug!("Terminal resized to {}x{}", cols, rows);
                self.scroll.apply(Action::Resize)
            }
            _ => Outcome::Ignore,
        }
    }

    /// Interactive loop: draw, block for the next event, repeat until quit.
    ///
    /// `next_event` is the only blocking call. An `Interrupted` error from it
    /// ends the loop cleanly.
    pub fn run<B, F>(&mut self, terminal: &mut Terminal<B>, mut next_event: F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> io::Result<Event>,
    {
        terminal.draw(|frame| {
            self.render(frame);
        })?;

        loop {
            let event = match next_event() {
                Ok(event) => event,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    tracing::info!("Input interrupted, leaving");
                    break;
                }
                Err(e) => return Err(e),
            };

            match self.handle_event(event) {
                Outcome::Quit => break,
                Outcome::Ignore => continue,
                Outcome::Redraw => {
                    terminal.draw(|frame| {
                        self.render(frame);
                    })?;
                }
            }
        }

        Ok(())
    }

    /// Write the whole document as plain text, one row per line
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let options = RenderOptions {
            show_indent_guides: self.scroll.show_indent_guides(),
            ..self.options.clone()
        };
        let lines = TreeRenderer::new(options).render_all(&self.document);
        for row in lines.rows() {
            writeln!(out, "{}", row.text())?;
        }
        Ok(())
    }
}

/// One pass: size the viewport from the surface, lay out, paint, record extent
fn render_pass<S: ScreenSurface + ?Sized>(
    document: &Element,
    options: &RenderOptions,
    scroll: &mut ScrollController,
    surface: &mut S,
) -> RenderResult {
    let (rows, cols) = surface.size();
    scroll.set_size(rows, cols);

    let renderer = TreeRenderer::new(RenderOptions {
        show_indent_guides: scroll.show_indent_guides(),
        ..options.clone()
    });
    let mut clipper = ViewportClipper::new(scroll.viewport());
    let result = renderer.render(document, &mut clipper);
    clipper.paint(surface);

    scroll.record(result);
    tracing::debug!(
        "Pass at {:?} in {}x{}: {:?}",
        scroll.origin(),
        cols,
        rows,
        result
    );
    result
}
