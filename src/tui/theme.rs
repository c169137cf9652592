use ratatui::style::Color;

use crate::model::{ThemeName, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub card_bg: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::preset(ThemeName::Dark)
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Built-in palette for a preset
    pub fn preset(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Theme {
                background: Color::Rgb(0x11, 0x14, 0x1C),
                card_bg: Color::Rgb(0x1B, 0x20, 0x2C),
                text: Color::Rgb(0xC8, 0xCD, 0xD8),
                text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
                highlight: Color::Rgb(0x5B, 0x8C, 0xFF),
                dim: Color::Rgb(0x6B, 0x72, 0x80),
                red: Color::Rgb(0xFF, 0x55, 0x55),
                yellow: Color::Rgb(0xFF, 0xD7, 0x00),
                green: Color::Rgb(0x44, 0xFF, 0x88),
                blue: Color::Rgb(0x44, 0x88, 0xFF),
                purple: Color::Rgb(0x9F, 0x6B, 0xFF),
                selection_bg: Color::Rgb(0x26, 0x33, 0x55),
                selection_border: Color::Rgb(0x5B, 0x8C, 0xFF),
                search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
                search_match_fg: Color::Rgb(0x11, 0x14, 0x1C),
            },
            ThemeName::Light => Theme {
                background: Color::Rgb(0xF5, 0xF6, 0xFA),
                card_bg: Color::Rgb(0xFF, 0xFF, 0xFF),
                text: Color::Rgb(0x33, 0x3A, 0x4A),
                text_bright: Color::Rgb(0x0B, 0x0E, 0x14),
                highlight: Color::Rgb(0x25, 0x63, 0xEB),
                dim: Color::Rgb(0x8A, 0x90, 0x9C),
                red: Color::Rgb(0xD9, 0x2D, 0x20),
                yellow: Color::Rgb(0xB4, 0x83, 0x00),
                green: Color::Rgb(0x16, 0x8A, 0x4A),
                blue: Color::Rgb(0x25, 0x63, 0xEB),
                purple: Color::Rgb(0x7C, 0x3A, 0xED),
                selection_bg: Color::Rgb(0xDB, 0xE6, 0xFE),
                selection_border: Color::Rgb(0x25, 0x63, 0xEB),
                search_match_bg: Color::Rgb(0xFD, 0xE6, 0x8A),
                search_match_fg: Color::Rgb(0x0B, 0x0E, 0x14),
            },
            ThemeName::Midnight => Theme {
                background: Color::Rgb(0x0C, 0x00, 0x1B),
                card_bg: Color::Rgb(0x1A, 0x0B, 0x30),
                text: Color::Rgb(0xB0, 0xAA, 0xFF),
                text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
                highlight: Color::Rgb(0xFB, 0x41, 0x96),
                dim: Color::Rgb(0x7D, 0x78, 0xBF),
                red: Color::Rgb(0xFF, 0x44, 0x44),
                yellow: Color::Rgb(0xFF, 0xD7, 0x00),
                green: Color::Rgb(0x44, 0xFF, 0x88),
                blue: Color::Rgb(0x44, 0x88, 0xFF),
                purple: Color::Rgb(0xCC, 0x66, 0xFF),
                selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
                selection_border: Color::Rgb(0xFB, 0x41, 0x96),
                search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
                search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
            },
        }
    }

    /// Create a theme from a preset plus `[ui.colors]` overrides
    pub fn from_config(name: ThemeName, ui: &UiConfig) -> Self {
        let mut theme = Theme::preset(name);

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "card_bg" => theme.card_bg = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "blue" => theme.blue = color,
                    "purple" => theme.purple = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => log::warn!("unknown theme color slot {key:?}"),
                }
            }
        }

        theme
    }
}
