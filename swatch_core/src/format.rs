use std::fmt;
use std::str::FromStr;

use crate::color::rgba_to_hex_digits;
use crate::{ColorEntry, SwatchError};

/// Text renderings offered for the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Hex,
    Rgba,
    Hsl,
    /// A SwiftUI `Color(...)` initializer.
    Swift,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Hex, Self::Rgba, Self::Hsl, Self::Swift];

    pub fn render(self, color: &ColorEntry) -> String {
        match self {
            Self::Hex => hex_text(color),
            Self::Rgba => rgba_text(color),
            Self::Hsl => hsl_text(color),
            Self::Swift => swift_text(color),
        }
    }

    pub fn menu_label(self) -> &'static str {
        match self {
            Self::Hex => "Copy HEX Value",
            Self::Rgba => "Copy RGBA Value",
            Self::Hsl => "Copy HSL Value",
            Self::Swift => "Copy Swift Format",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hex => "hex",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Swift => "swift",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| SwatchError::rejected("export format", s))
    }
}

/// `#RRGGBB`, or `#RRGGBBAA` when translucent.
pub fn hex_text(color: &ColorEntry) -> String {
    format!("#{}", rgba_to_hex_digits(color.rgba()))
}

pub fn rgba_text(color: &ColorEntry) -> String {
    let c = color.rgba();
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a)
}

pub fn hsl_text(color: &ColorEntry) -> String {
    let c = color.hsl();
    format!("hsl({}, {}, {})", c.hue(), c.saturation(), c.lightness())
}

pub fn swift_text(color: &ColorEntry) -> String {
    let c = color.rgba();
    format!(
        "Color(red: {}/255, green: {}/255, blue: {}/255, opacity: {}/255)",
        c.r, c.g, c.b, c.a
    )
}
