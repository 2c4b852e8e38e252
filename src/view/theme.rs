use crate::config::{ConfigError, PaletteConfig};
use crate::view::line_buffer::RunStyle;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Terminal colors for each [`RunStyle`].
///
/// Built once at startup and handed to the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    plain: Color,
    tag_markup: Color,
    tag_name: Color,
    attr_name: Color,
    attr_value: Color,
    text: Color,
    indent_guide: Color,
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            plain: parse_color("plain", &config.plain)?,
            tag_markup: parse_color("tag_markup", &config.tag_markup)?,
            tag_name: parse_color("tag_name", &config.tag_name)?,
            attr_name: parse_color("attr_name", &config.attr_name)?,
            attr_value: parse_color("attr_value", &config.attr_value)?,
            text: parse_color("text", &config.text)?,
            indent_guide: parse_color("indent_guide", &config.indent_guide)?,
        })
    }

    pub fn color(&self, style: RunStyle) -> Color {
        match style {
            RunStyle::Plain => self.plain,
            RunStyle::TagMarkup => self.tag_markup,
            RunStyle::TagName => self.tag_name,
            RunStyle::AttrName => self.attr_name,
            RunStyle::AttrValue => self.attr_value,
            RunStyle::Text => self.text,
            RunStyle::IndentGuide => self.indent_guide,
        }
    }

    /// ratatui style for a run; emphasis is drawn bold
    pub fn style(&self, style: RunStyle, emphasis: bool) -> Style {
        let base = Style::default().fg(self.color(style));
        if emphasis {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            plain: Color::White,
            tag_markup: Color::Cyan,
            tag_name: Color::Cyan,
            attr_name: Color::Yellow,
            attr_value: Color::Magenta,
            text: Color::Red,
            indent_guide: Color::Blue,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    Color::from_str(value).map_err(|_| {
        ConfigError::ValidationError(format!("palette.{field}: unknown color '{value}'"))
    })
}
