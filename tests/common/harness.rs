// ViewerTestHarness - virtual terminal environment for E2E testing

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use cursexml::app::scroll::Outcome;
use cursexml::app::Viewer;
use cursexml::config::Config;
use cursexml::input::keybindings::Action;
use cursexml::model::document;
use cursexml::model::element::Element;
use ratatui::buffer::{Buffer, Cell};
use ratatui::{backend::TestBackend, Terminal};
use std::io;
use std::path::Path;

/// Virtual viewer environment for testing.
/// Captures all rendering output without displaying to an actual terminal.
pub struct ViewerTestHarness {
    viewer: Viewer,

    /// Virtual terminal backend
    terminal: Terminal<TestBackend>,
}

impl ViewerTestHarness {
    /// Parse `xml` and open it in a virtual terminal with the default config
    pub fn new(xml: &str, width: u16, height: u16) -> io::Result<Self> {
        Self::with_config(xml, &Config::default(), width, height)
    }

    pub fn with_config(xml: &str, config: &Config, width: u16, height: u16) -> io::Result<Self> {
        let root = document::parse(xml).map_err(io::Error::other)?;
        let viewer = Viewer::new(root, config).map_err(io::Error::other)?;
        Self::from_viewer(viewer, width, height)
    }

    /// Open an already-built tree
    pub fn from_element(root: Element, width: u16, height: u16) -> io::Result<Self> {
        let viewer = Viewer::new(root, &Config::default()).map_err(io::Error::other)?;
        Self::from_viewer(viewer, width, height)
    }

    /// Load a document from disk the same way the binary does
    pub fn open_file(path: &Path, width: u16, height: u16) -> io::Result<Self> {
        let root = document::load(path).map_err(io::Error::other)?;
        let viewer = Viewer::new(root, &Config::default()).map_err(io::Error::other)?;
        Self::from_viewer(viewer, width, height)
    }

    fn from_viewer(viewer: Viewer, width: u16, height: u16) -> io::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut harness = Self { viewer, terminal };
        harness.render()?;
        Ok(harness)
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// (row, col) of the top-left visible cell
    pub fn origin(&self) -> (usize, usize) {
        self.viewer.scroll().origin()
    }

    pub fn reached_document_end(&self) -> bool {
        self.viewer.scroll().last_result().reached_document_end
    }

    /// Simulate a key press; redraws only when the viewer asks for it
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<Outcome> {
        let outcome = self
            .viewer
            .handle_event(Event::Key(KeyEvent::new(code, modifiers)));
        if outcome == Outcome::Redraw {
            self.render()?;
        }
        Ok(outcome)
    }

    /// Send the same key press multiple times, redrawing after each one
    /// (every move is clamped against the previous pass)
    pub fn send_key_repeat(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        count: usize,
    ) -> io::Result<()> {
        for _ in 0..count {
            self.send_key(code, modifiers)?;
        }
        Ok(())
    }

    /// Apply an action directly and redraw
    pub fn apply(&mut self, action: Action) -> io::Result<Outcome> {
        let outcome = self.viewer.apply(action);
        if outcome == Outcome::Redraw {
            self.render()?;
        }
        Ok(outcome)
    }

    /// Resize the virtual terminal and deliver the resize event
    pub fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.terminal.backend_mut().resize(width, height);
        self.viewer.handle_event(Event::Resize(width, height));
        self.render()
    }

    pub fn render(&mut self) -> io::Result<()> {
        self.terminal.draw(|frame| {
            self.viewer.render(frame);
        })?;
        Ok(())
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn get_cell(&self, x: u16, y: u16) -> &Cell {
        &self.buffer()[(x, y)]
    }

    /// Get text of a row, padded to the terminal width
    pub fn get_row_text(&self, y: u16) -> String {
        let buffer = self.buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    /// Visible rows with trailing blanks removed
    pub fn screen_rows(&self) -> Vec<String> {
        (0..self.buffer().area.height)
            .map(|y| self.get_row_text(y).trim_end().to_string())
            .collect()
    }

    /// Get entire screen as string (for debugging)
    pub fn screen_to_string(&self) -> String {
        let height = self.buffer().area.height;
        (0..height)
            .map(|y| self.get_row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verify text appears on screen
    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Verify text does not appear on screen
    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{text}'\nScreen content:\n{screen}"
        );
    }
}
