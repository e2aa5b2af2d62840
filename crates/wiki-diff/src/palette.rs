//! Colours for rendering diff blocks in light and dark themes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{DiffRowContentType, DiffRowMarker};

/// Theme variant to pick colours for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" | "normal" | "day" => Ok(ColorScheme::Light),
            "dark" | "night" => Ok(ColorScheme::Dark),
            other => Err(format!("unknown color scheme: {}", other)),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Light => write!(f, "light"),
            ColorScheme::Dark => write!(f, "dark"),
        }
    }
}

/// An sRGB colour with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour from `0xRRGGBB`.
    pub const fn opaque(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 1.0)
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// True when fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// `#rrggbb` notation, alpha ignored.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend onto an opaque background, for outputs without alpha support.
    pub fn over(&self, background: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Rgba::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
            1.0,
        )
    }
}

/// Border colours keyed by row marker and background colours keyed by span type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffPalette {
    pub border_none: Rgba,
    pub border_plus: Rgba,
    pub border_minus: Rgba,
    pub background_plain: Rgba,
    pub background_add: Rgba,
    pub background_delete: Rgba,
    /// Page background the palette is designed against.
    pub page: Rgba,
}

impl DiffPalette {
    /// Colours for light themes.
    pub const LIGHT: DiffPalette = DiffPalette {
        border_none: Rgba::opaque(0xe6e6e6),
        border_plus: Rgba::opaque(0xd8ecff),
        border_minus: Rgba::opaque(0xffe49c),
        background_plain: Rgba::TRANSPARENT,
        background_add: Rgba::opaque(0xd8ecff),
        background_delete: Rgba::opaque(0xffe49c),
        page: Rgba::opaque(0xffffff),
    };

    /// Colours for dark themes.
    pub const DARK: DiffPalette = DiffPalette {
        border_none: Rgba::opaque(0x6d6d6d),
        border_plus: Rgba::opaque(0x81daf5),
        border_minus: Rgba::opaque(0xffcc00),
        background_plain: Rgba::TRANSPARENT,
        background_add: Rgba::opaque(0x81daf5).with_alpha(0.3),
        background_delete: Rgba::opaque(0xffcc00).with_alpha(0.3),
        page: Rgba::opaque(0x121212),
    };

    /// Palette for a scheme.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::LIGHT,
            ColorScheme::Dark => Self::DARK,
        }
    }

    /// Left border colour for a row.
    pub fn border(&self, marker: DiffRowMarker) -> Rgba {
        match marker {
            DiffRowMarker::None => self.border_none,
            DiffRowMarker::Plus => self.border_plus,
            DiffRowMarker::Minus => self.border_minus,
        }
    }

    /// Highlight colour behind a span.
    pub fn background(&self, kind: DiffRowContentType) -> Rgba {
        match kind {
            DiffRowContentType::Plain => self.background_plain,
            DiffRowContentType::Add => self.background_add,
            DiffRowContentType::Delete => self.background_delete,
        }
    }
}

impl Default for DiffPalette {
    fn default() -> Self {
        Self::LIGHT
    }
}
