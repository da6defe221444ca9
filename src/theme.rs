//! Colors for the window chrome, the text area and popups
//!
//! Two built-in themes are available: a light one that resembles a native
//! desktop widget (the default) and a dark one. The config file picks
//! between them by id.

use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB"
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors offered by the color picker, in grid order
pub const COLOR_PALETTE: &[(&str, Color)] = &[
    ("Black", Color::rgb(0x00, 0x00, 0x00)),
    ("Dark Gray", Color::rgb(0x55, 0x55, 0x55)),
    ("Gray", Color::rgb(0xA0, 0xA0, 0xA4)),
    ("White", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("Dark Red", Color::rgb(0x80, 0x00, 0x00)),
    ("Red", Color::rgb(0xFF, 0x00, 0x00)),
    ("Orange", Color::rgb(0xFF, 0x80, 0x00)),
    ("Yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("Dark Green", Color::rgb(0x00, 0x80, 0x00)),
    ("Green", Color::rgb(0x00, 0xFF, 0x00)),
    ("Dark Cyan", Color::rgb(0x00, 0x80, 0x80)),
    ("Cyan", Color::rgb(0x00, 0xFF, 0xFF)),
    ("Dark Blue", Color::rgb(0x00, 0x00, 0x80)),
    ("Blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("Dark Magenta", Color::rgb(0x80, 0x00, 0x80)),
    ("Magenta", Color::rgb(0xFF, 0x00, 0xFF)),
];

/// Number of swatches per row in the color picker grid
pub const PALETTE_COLUMNS: usize = 4;

/// Built-in theme selector, stored in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub editor: EditorTheme,
    pub chrome: ChromeTheme,
    pub status_bar: StatusBarTheme,
    pub popup: PopupTheme,
}

/// Text area colors
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub background: Color,
    /// Used for text whose run carries no explicit color
    pub foreground: Color,
    pub cursor_color: Color,
    pub selection_background: Color,
}

/// Menu bar and toolbar colors
#[derive(Debug, Clone)]
pub struct ChromeTheme {
    pub menu_bar_background: Color,
    pub toolbar_background: Color,
    pub foreground: Color,
    pub button_background: Color,
    pub button_hover_background: Color,
    pub border: Color,
}

#[derive(Debug, Clone)]
pub struct StatusBarTheme {
    pub background: Color,
    pub foreground: Color,
}

/// Menus, dropdowns and picker dialogs
#[derive(Debug, Clone)]
pub struct PopupTheme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub highlight_background: Color,
    pub highlight_foreground: Color,
    pub dimmed_foreground: Color,
    /// Semi-transparent layer drawn behind modal pickers
    pub backdrop: Color,
}

impl Theme {
    pub fn from_id(id: ThemeId) -> Self {
        match id {
            ThemeId::Light => Self::default_light(),
            ThemeId::Dark => Self::default_dark(),
        }
    }

    pub fn default_light() -> Self {
        Theme {
            name: "Default Light",
            editor: EditorTheme {
                background: Color::rgb(0xFF, 0xFF, 0xFF),
                foreground: Color::rgb(0x00, 0x00, 0x00),
                cursor_color: Color::rgb(0x00, 0x00, 0x00),
                selection_background: Color::rgb(0xB4, 0xD5, 0xFE),
            },
            chrome: ChromeTheme {
                menu_bar_background: Color::rgb(0xF3, 0xF3, 0xF3),
                toolbar_background: Color::rgb(0xEC, 0xEC, 0xEC),
                foreground: Color::rgb(0x1F, 0x1F, 0x1F),
                button_background: Color::rgb(0xFD, 0xFD, 0xFD),
                button_hover_background: Color::rgb(0xDD, 0xE8, 0xF6),
                border: Color::rgb(0xC8, 0xC8, 0xC8),
            },
            status_bar: StatusBarTheme {
                background: Color::rgb(0xEC, 0xEC, 0xEC),
                foreground: Color::rgb(0x30, 0x30, 0x30),
            },
            popup: PopupTheme {
                background: Color::rgb(0xFB, 0xFB, 0xFB),
                foreground: Color::rgb(0x1F, 0x1F, 0x1F),
                border: Color::rgb(0xA0, 0xA0, 0xA0),
                highlight_background: Color::rgb(0x30, 0x78, 0xD7),
                highlight_foreground: Color::rgb(0xFF, 0xFF, 0xFF),
                dimmed_foreground: Color::rgb(0x80, 0x80, 0x80),
                backdrop: Color::rgba(0x00, 0x00, 0x00, 0x40),
            },
        }
    }

    pub fn default_dark() -> Self {
        Theme {
            name: "Default Dark",
            editor: EditorTheme {
                background: Color::rgb(0x1E, 0x1E, 0x1E),
                foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                cursor_color: Color::rgb(0xFF, 0xFF, 0xFF),
                selection_background: Color::rgb(0x26, 0x4F, 0x78),
            },
            chrome: ChromeTheme {
                menu_bar_background: Color::rgb(0x2B, 0x2D, 0x30),
                toolbar_background: Color::rgb(0x25, 0x27, 0x29),
                foreground: Color::rgb(0xDF, 0xE1, 0xE5),
                button_background: Color::rgb(0x34, 0x37, 0x3B),
                button_hover_background: Color::rgb(0x43, 0x45, 0x4A),
                border: Color::rgb(0x39, 0x3B, 0x40),
            },
            status_bar: StatusBarTheme {
                background: Color::rgb(0x00, 0x7A, 0xCC),
                foreground: Color::rgb(0xFF, 0xFF, 0xFF),
            },
            popup: PopupTheme {
                background: Color::rgb(0x2B, 0x2D, 0x30),
                foreground: Color::rgb(0xDF, 0xE1, 0xE5),
                border: Color::rgb(0x43, 0x45, 0x4A),
                highlight_background: Color::rgb(0x2E, 0x43, 0x6E),
                highlight_foreground: Color::rgb(0xFF, 0xFF, 0xFF),
                dimmed_foreground: Color::rgb(0x6F, 0x73, 0x7A),
                backdrop: Color::rgba(0x00, 0x00, 0x00, 0x60),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_light()
    }
}
