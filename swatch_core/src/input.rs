// swatch_core/src/input.rs
//! Validation for the text fields a UI uses to edit a color.
//!
//! Every parser either returns a value inside its range or
//! [`SwatchError::InputRejected`]; nothing is clamped.

use std::str::FromStr;

use crate::{Hsl, Result, Rgba, SwatchError};

pub const MAX_HEX_DIGITS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbaField {
    Red,
    Green,
    Blue,
    Alpha,
}

impl RgbaField {
    pub const ALL: [RgbaField; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "opacity",
        }
    }

    pub fn get(self, rgba: Rgba) -> u8 {
        match self {
            Self::Red => rgba.r,
            Self::Green => rgba.g,
            Self::Blue => rgba.b,
            Self::Alpha => rgba.a,
        }
    }

    pub fn set(self, rgba: Rgba, value: u8) -> Rgba {
        let mut out = rgba;
        match self {
            Self::Red => out.r = value,
            Self::Green => out.g = value,
            Self::Blue => out.b = value,
            Self::Alpha => out.a = value,
        }
        out
    }
}

impl FromStr for RgbaField {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            "a" | "alpha" | "opacity" => Ok(Self::Alpha),
            _ => Err(SwatchError::rejected("rgba field", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HslField {
    Hue,
    Saturation,
    Lightness,
}

impl HslField {
    pub const ALL: [HslField; 3] = [Self::Hue, Self::Saturation, Self::Lightness];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Lightness => "lightness",
        }
    }

    pub fn get(self, hsl: Hsl) -> u16 {
        match self {
            Self::Hue => hsl.hue(),
            Self::Saturation => hsl.saturation() as u16,
            Self::Lightness => hsl.lightness() as u16,
        }
    }

    /// Validate `text` for this field and return `hsl` with it replaced.
    pub fn apply(self, hsl: Hsl, text: &str) -> Result<Hsl> {
        match self {
            Self::Hue => hsl.with_hue(parse_hue(text)?),
            Self::Saturation => hsl.with_saturation(parse_percent(self.label(), text)?),
            Self::Lightness => hsl.with_lightness(parse_percent(self.label(), text)?),
        }
    }
}

impl FromStr for HslField {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "h" | "hue" => Ok(Self::Hue),
            "s" | "sat" | "saturation" => Ok(Self::Saturation),
            "l" | "light" | "lightness" => Ok(Self::Lightness),
            _ => Err(SwatchError::rejected("hsl field", s)),
        }
    }
}

/// Keep hex digits only, uppercased, at most [`MAX_HEX_DIGITS`] of them.
pub fn filter_hex_input(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_hexdigit)
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_HEX_DIGITS)
        .collect()
}

fn parse_int(field: &'static str, text: &str) -> Result<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| SwatchError::rejected(field, text))
}

/// A single RGBA channel, `0..=255`.
pub fn parse_channel(field: &'static str, text: &str) -> Result<u8> {
    let n = parse_int(field, text)?;
    u8::try_from(n).map_err(|_| SwatchError::rejected(field, text))
}

/// Hue in degrees, `0..360`.
pub fn parse_hue(text: &str) -> Result<u16> {
    let n = parse_int("hue", text)?;
    match u16::try_from(n) {
        Ok(h) if h < 360 => Ok(h),
        _ => Err(SwatchError::rejected("hue", text)),
    }
}

/// Saturation or lightness, `0..=100`.
pub fn parse_percent(field: &'static str, text: &str) -> Result<u8> {
    let n = parse_int(field, text)?;
    match u8::try_from(n) {
        Ok(p) if p <= 100 => Ok(p),
        _ => Err(SwatchError::rejected(field, text)),
    }
}

fn split_list(text: &str) -> Vec<&str> {
    text.trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split([',', ' '])
        .filter(|s| !s.is_empty())
        .collect()
}

/// `r,g,b` or `r,g,b,a` (commas and/or spaces). Alpha defaults to 255.
pub fn parse_rgba_list(text: &str) -> Result<Rgba> {
    let parts = split_list(text);
    if !(3..=4).contains(&parts.len()) {
        return Err(SwatchError::rejected("rgba", text));
    }
    let mut rgba = Rgba::WHITE;
    for (field, part) in RgbaField::ALL.into_iter().zip(&parts) {
        rgba = field.set(rgba, parse_channel(field.label(), part)?);
    }
    Ok(rgba)
}

/// `h,s,l` (commas and/or spaces).
pub fn parse_hsl_list(text: &str) -> Result<Hsl> {
    let parts = split_list(text);
    let [h, s, l] = parts.as_slice() else {
        return Err(SwatchError::rejected("hsl", text));
    };
    Hsl::new(
        parse_hue(h)?,
        parse_percent("saturation", s)?,
        parse_percent("lightness", l)?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_filter_drops_noise_and_caps_length() {
        assert_eq!(filter_hex_input("#ff00zz"), "FF00");
        assert_eq!(filter_hex_input("0123456789abcdef"), "01234567");
        assert_eq!(filter_hex_input("xyz"), "");
    }

    #[test]
    fn channel_bounds() {
        assert_eq!(parse_channel("red", " 255 ").ok(), Some(255));
        assert_eq!(parse_channel("red", "0").ok(), Some(0));
        assert!(parse_channel("red", "256").is_err());
        assert!(parse_channel("red", "-1").is_err());
        assert!(parse_channel("red", "ten").is_err());
    }

    #[test]
    fn hue_and_percent_bounds() {
        assert_eq!(parse_hue("359").ok(), Some(359));
        assert!(parse_hue("360").is_err());
        assert_eq!(parse_percent("saturation", "100").ok(), Some(100));
        assert!(parse_percent("saturation", "101").is_err());
    }

    #[test]
    fn rejection_names_the_field() {
        let err = parse_percent("lightness", "300").unwrap_err();
        assert!(matches!(
            err,
            SwatchError::InputRejected { field: "lightness", ref value } if value == "300"
        ));
    }

    #[test]
    fn lists() -> anyhow::Result<()> {
        assert_eq!(parse_rgba_list("10, 20, 30")?, Rgba::opaque(10, 20, 30));
        assert_eq!(parse_rgba_list("(10 20 30 40)")?, Rgba::new(10, 20, 30, 40));
        assert!(parse_rgba_list("1,2").is_err());
        assert!(parse_rgba_list("1,2,3,999").is_err());

        assert_eq!(parse_hsl_list("210,50,40")?, Hsl::new(210, 50, 40)?);
        assert!(parse_hsl_list("400,50,40").is_err());
        assert!(parse_hsl_list("1,2").is_err());
        Ok(())
    }

    #[test]
    fn hsl_field_apply_validates() -> anyhow::Result<()> {
        let base = Hsl::new(10, 20, 30)?;
        assert_eq!(HslField::Hue.apply(base, "200")?.hue(), 200);
        assert!(HslField::Saturation.apply(base, "120").is_err());
        Ok(())
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("Opacity".parse::<RgbaField>().ok(), Some(RgbaField::Alpha));
        assert_eq!("l".parse::<HslField>().ok(), Some(HslField::Lightness));
        assert!("x".parse::<HslField>().is_err());
    }
}
