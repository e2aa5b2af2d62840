//! Type definitions for tinted wikitext

use serde::{Deserialize, Serialize};

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from `0xRRGGBB`
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// `#rrggbb` notation
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Styling applied to a run of wikitext
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TintStyle {
    /// Foreground colour (None = editor default)
    pub color: Option<Rgb>,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl TintStyle {
    /// Unstyled text
    pub const PLAIN: TintStyle = TintStyle {
        color: None,
        bold: false,
        italic: false,
    };

    /// Style with only a colour
    pub const fn colored(color: Rgb) -> Self {
        Self {
            color: Some(color),
            bold: false,
            italic: false,
        }
    }

    /// Same style, bold
    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Same style, italic
    pub const fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    /// Lay `top` over this style: its colour wins, emphasis accumulates
    pub fn overlay(&self, top: &TintStyle) -> TintStyle {
        TintStyle {
            color: top.color.or(self.color),
            bold: self.bold || top.bold,
            italic: self.italic || top.italic,
        }
    }

    /// True when nothing is applied
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

/// A maximal piece of the source text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintedRun {
    /// The text content
    pub text: String,

    /// Applied style
    pub style: TintStyle,
}

impl TintedRun {
    /// Create a run
    pub fn new(text: impl Into<String>, style: TintStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Join run texts back into the source text
pub fn plain_text(runs: &[TintedRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}
